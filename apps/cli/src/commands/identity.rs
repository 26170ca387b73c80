//! DNI lookup command.

use boleta_core::types::IdentityRecord;

use crate::state::AppState;

pub async fn dni(state: &AppState, dni: &str) -> anyhow::Result<()> {
    match state.identity.lookup(dni).await? {
        Some(record) => println!("{}", describe(&record)),
        None => println!("No data found for DNI {}", dni.trim()),
    }
    Ok(())
}

fn describe(record: &IdentityRecord) -> String {
    format!(
        "DNI {}\nNames:    {}\nSurnames: {}",
        record.dni,
        record.names,
        record.surnames()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let record = IdentityRecord {
            dni: "12345678".into(),
            names: "ANA".into(),
            paternal_surname: "QUISPE".into(),
            maternal_surname: "MAMANI".into(),
        };
        assert_eq!(
            describe(&record),
            "DNI 12345678\nNames:    ANA\nSurnames: QUISPE MAMANI"
        );
    }
}
