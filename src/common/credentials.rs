// src/common/credentials.rs

use rand::Rng;

const EMPLOYEE_ID_PREFIX: &str = "EMP";

// Sem caracteres ambíguos (0/O, 1/l/I)
const PASSWORD_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";
const PASSWORD_LENGTH: usize = 8;

// "EMP" + 4 dígitos (1000..=9999). A unicidade é checada no serviço antes do insert.
pub fn generate_employee_id() -> String {
    let number: u32 = rand::rng().random_range(1000..=9999);
    format!("{EMPLOYEE_ID_PREFIX}{number}")
}

pub fn generate_password() -> String {
    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..PASSWORD_ALPHABET.len());
            PASSWORD_ALPHABET[idx] as char
        })
        .collect()
}
