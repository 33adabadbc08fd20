//! Customer accounts. Accounts are created by shoppers registering, so the
//! admin can only edit and delete them.

use threadline_client::ApiClient;
use threadline_core::forms::optional;
use threadline_core::models::{User, UserUpdate};
use threadline_core::{FormErrors, UserId, UserRole};

use crate::components::{DataTableConfig, TableRow, customers_table_config};
use crate::confirm::ConfirmedDelete;
use crate::error::{AdminError, Result};
use crate::forms::FormModel;
use crate::resource::Resource;

/// Customer edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `customer` or `admin`.
    pub role: String,
}

impl FormModel for CustomerForm {
    type Record = User;
    type Output = UserUpdate;

    fn from_record(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            role: user.role.to_string(),
        }
    }

    fn validate(&self) -> std::result::Result<UserUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.required("name", &self.name);
        let email = errors.email("email", &self.email);
        let role = self.role.parse::<UserRole>().unwrap_or_else(|e| {
            errors.push("role", e);
            UserRole::default()
        });
        match email {
            Some(email) if errors.is_empty() => Ok(UserUpdate {
                name,
                email: email.into_inner(),
                phone: optional(&self.phone),
                role,
            }),
            _ => Err(errors),
        }
    }
}

/// The customers collection.
#[derive(Debug, Clone)]
pub struct Customers {
    client: ApiClient,
}

impl Customers {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl Resource for Customers {
    type Record = User;
    type Form = CustomerForm;

    const NAME: &'static str = "customer";
    const CAN_CREATE: bool = false;

    fn table(&self) -> DataTableConfig {
        customers_table_config()
    }

    fn row(&self, user: &User) -> TableRow {
        TableRow::new(user.id.as_str())
            .cell("name", &user.name)
            .cell("email", &user.email)
            .cell("phone", user.phone.as_deref().unwrap_or("-"))
            .cell("role", user.role.to_string())
            .cell("addresses", user.addresses.len().to_string())
            .cell(
                "created",
                user.created_at
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            )
    }

    fn blank_form(&self) -> CustomerForm {
        CustomerForm {
            role: UserRole::Customer.to_string(),
            ..CustomerForm::default()
        }
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.client.users().list().await?)
    }

    async fn create(&self, _input: UserUpdate) -> Result<User> {
        Err(AdminError::CreateNotSupported(Self::NAME))
    }

    async fn update(&self, id: &UserId, input: UserUpdate) -> Result<User> {
        Ok(self.client.users().update(id, &input).await?)
    }

    async fn delete(&self, target: &ConfirmedDelete<UserId>) -> Result<()> {
        Ok(self.client.users().delete(target.id()).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use threadline_client::ClientConfig;

    use super::*;
    use crate::CrudScreen;

    fn user() -> User {
        serde_json::from_value(json!({
            "_id": "u1", "name": "Ada Lovelace", "email": "ada@example.com",
            "role": "admin", "createdAt": "2026-03-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_form_prefills_from_user() {
        let form = CustomerForm::from_record(&user());
        assert_eq!(form.name, "Ada Lovelace");
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.role, "admin");
        assert_eq!(form.phone, "");
    }

    #[test]
    fn test_every_bad_field_is_reported() {
        let form = CustomerForm {
            name: String::new(),
            email: "ada".into(),
            phone: String::new(),
            role: "owner".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("role"), Some("invalid role: owner"));
    }

    #[test]
    fn test_customers_cannot_be_created() {
        let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
        let mut screen = CrudScreen::new(Customers::new(client));
        assert!(matches!(
            screen.open_create(),
            Err(AdminError::CreateNotSupported("customer"))
        ));
        assert!(screen.form().is_none());
    }
}
