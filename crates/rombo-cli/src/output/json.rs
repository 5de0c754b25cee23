use rombo_core::error::RomboError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), RomboError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
