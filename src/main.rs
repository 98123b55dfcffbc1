fn main() -> anyhow::Result<()> {
    loan_pipeline_filter::run()
}
