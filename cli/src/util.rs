/// Validate that a depth parameter is non-negative and fits the engine's
/// unsigned depth.
pub fn check_non_negative(value: i64, param_name: &str) -> Result<u32, String> {
    if value < 0 {
        return Err(format!(
            "{} must be non-negative, got {}",
            param_name, value
        ));
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}
