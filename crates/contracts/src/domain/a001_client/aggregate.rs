use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::uuid_aggregate_id;

// ============================================================================
// ID Type
// ============================================================================

uuid_aggregate_id!(
    /// Unique client identifier
    ClientId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// CRM client (company or individual holding licenses)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(flatten)]
    pub base: BaseAggregate<ClientId>,

    /// CNPJ / CPF as typed by staff
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Client {
    pub fn new_for_insert(code: String, name: String) -> Self {
        Self {
            base: BaseAggregate::new(ClientId::new_v4(), code, name),
            document: String::new(),
            email: None,
            phone: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Apply form data
    pub fn update(&mut self, dto: &ClientDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.trim().to_string();
        }
        self.base.description = dto.name.trim().to_string();
        self.base.comment = dto.comment.clone();
        self.document = dto.document.trim().to_string();
        self.email = non_empty(&dto.email);
        self.phone = non_empty(&dto.phone);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Nome do cliente não pode ser vazio".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Código do cliente não pode ser vazio".into());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(format!("E-mail inválido: {}", email));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.before_write();
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AggregateRoot for Client {
    type Id = ClientId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "client"
    }

    fn element_name() -> &'static str {
        "Cliente"
    }

}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create/update form for a client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, email: Option<&str>) -> ClientDto {
        ClientDto {
            code: Some("CLI-001".into()),
            name: name.into(),
            document: " 12.345.678/0001-90 ".into(),
            email: email.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_trims_and_drops_blank_contacts() {
        let mut client = Client::new_for_insert("TMP".into(), String::new());
        client.update(&ClientDto {
            phone: Some("   ".into()),
            ..dto("  Acme Ltda ", Some("contato@acme.com.br"))
        });

        assert_eq!(client.code(), "CLI-001");
        assert_eq!(client.name(), "Acme Ltda");
        assert_eq!(client.document, "12.345.678/0001-90");
        assert_eq!(client.email.as_deref(), Some("contato@acme.com.br"));
        assert_eq!(client.phone, None);
        assert!(client.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name_and_bad_email() {
        let mut client = Client::new_for_insert("CLI-002".into(), String::new());
        client.update(&dto(" ", None));
        assert!(client.validate().is_err());

        client.update(&dto("Acme", Some("acme.com.br")));
        let err = client.validate().unwrap_err();
        assert!(err.contains("E-mail"));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Client::full_name(), "a001_client");
    }
}
