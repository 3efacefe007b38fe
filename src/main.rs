fn main() -> anyhow::Result<()> {
    zenuxos_lib::run()
}
