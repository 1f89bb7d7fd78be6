//! Customer Data

use crate::domain::customers::records::CustomerUuid;

/// New Customer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
}

impl NewCustomer {
    /// Trim surrounding whitespace from every field.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            uuid: self.uuid,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
        }
    }

    /// All of name, email and mobile are required.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.mobile]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_fields() {
        let customer = NewCustomer {
            uuid: CustomerUuid::new(),
            name: " Kavya ".to_string(),
            email: "kavya@example.com\n".to_string(),
            mobile: " 9876543210".to_string(),
        }
        .normalized();

        assert_eq!(customer.name, "Kavya");
        assert_eq!(customer.email, "kavya@example.com");
        assert_eq!(customer.mobile, "9876543210");
    }

    #[test]
    fn missing_mobile_is_incomplete() {
        let customer = NewCustomer {
            uuid: CustomerUuid::new(),
            name: "Kavya".to_string(),
            email: "kavya@example.com".to_string(),
            mobile: "   ".to_string(),
        };

        assert!(!customer.is_complete());
    }
}
