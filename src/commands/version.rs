use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("popwatch version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
