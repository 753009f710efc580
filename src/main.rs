use rask_error_consolidator::app;

fn main() -> anyhow::Result<()> {
    app::main()
}
