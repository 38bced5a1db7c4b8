use rs_prefab::Prefab;

/// Side-effect imports so every prefab script registers itself on load.
pub fn emit_index(prefabs: &[Prefab]) -> String {
    prefabs
        .iter()
        .map(|p| format!("import \"./{}\";", p.id))
        .collect::<Vec<_>>()
        .join("\n")
}
