use courier_action::ActionRegistry;

pub fn run(registry: &ActionRegistry) -> anyhow::Result<()> {
    for info in registry.destinations() {
        println!("{} {} ({})", info.slug, info.version, info.name);
        for (_, action, handler) in registry.iter().filter(|(d, _, _)| *d == info.slug) {
            println!("  {action:<12} {}", handler.metadata().title);
        }
    }
    Ok(())
}
