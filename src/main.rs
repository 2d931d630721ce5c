fn main() -> anyhow::Result<()> {
    ray_map_editor::run()
}
