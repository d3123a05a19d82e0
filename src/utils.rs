use exam_timer::settings::{MAX_TOTAL_MINUTES, MIN_TOTAL_MINUTES};

/// Parse the exam duration field: whole minutes within the accepted range.
pub fn validate_duration(input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Exam duration cannot be empty".to_string());
    }
    let minutes: u32 = trimmed
        .parse()
        .map_err(|_| "Exam duration must be a valid number".to_string())?;
    if minutes < MIN_TOTAL_MINUTES {
        return Err(format!("Exam duration must be at least {}", MIN_TOTAL_MINUTES));
    }
    if minutes > MAX_TOTAL_MINUTES {
        return Err(format!("Exam duration cannot exceed {}", MAX_TOTAL_MINUTES));
    }
    Ok(minutes)
}
