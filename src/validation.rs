//! Input validation module
//!
//! Centralized local validation, executed before any network call:
//! - Product fields (name, price, stock)
//! - Seller fields (name, email)
//! - Password policy for the forced rotation flow
//! - Sale note length

/// Validation result type
pub type ValidationResult = Result<(), String>;

/// Validate a product name
pub fn validate_product_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Nome do produto não pode ficar vazio".into());
    }

    if trimmed.len() > 200 {
        return Err("Nome do produto deve ter no máximo 200 caracteres".into());
    }

    Ok(())
}

/// Validate a monetary amount (price, discount value)
pub fn validate_amount(amount: f64) -> ValidationResult {
    if amount.is_nan() || amount.is_infinite() {
        return Err("Valor inválido".into());
    }

    if amount < 0.0 {
        return Err("Valor não pode ser negativo".into());
    }

    Ok(())
}

/// Validate a stock quantity
pub fn validate_stock(stock: i64) -> ValidationResult {
    if stock < 0 {
        return Err("Estoque não pode ser negativo".into());
    }

    Ok(())
}

/// Validate a seller name
pub fn validate_seller_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err("Nome é obrigatório.".into());
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err("Email é obrigatório.".into());
    }

    if trimmed.len() > 254 {
        return Err("Email longo demais (máx 254 caracteres)".into());
    }

    let parts: Vec<&str> = trimmed.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err("Formato de email inválido".into());
    }

    Ok(())
}

/// Validate password strength for the forced rotation flow
/// - Minimum length: 6 characters
/// - Must contain: uppercase, lowercase, number, special character
pub fn validate_password(password: &str) -> ValidationResult {
    let has_len = password.len() >= 6;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_ascii_alphanumeric());

    if !(has_len && has_upper && has_lower && has_digit && has_special) {
        return Err("Sua senha ainda não atende todos os requisitos.".into());
    }

    Ok(())
}

/// Validate that the password confirmation matches
pub fn validate_password_confirmation(password: &str, confirm: &str) -> ValidationResult {
    if password != confirm {
        return Err("As senhas não coincidem.".into());
    }

    Ok(())
}

/// Validate sale notes
pub fn validate_note(note: &str) -> ValidationResult {
    if note.len() > 500 {
        return Err("Observação longa demais (máx 500 caracteres)".into());
    }

    Ok(())
}

/// Format a value as BRL currency for messages and receipts (R$ 1.234,56)
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}R$ {},{:02}", if negative { "-" } else { "" }, grouped, frac)
}
