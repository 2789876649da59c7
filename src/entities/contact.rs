//! Contacts associated with a project
//!
//! Architects, contractors, and customers share an identical shape, so one
//! struct covers all three; `ContactRole` selects the backing table.

use serde::Serialize;

/// A person or firm associated with a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Store-assigned id (0 until persisted)
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub physical_address: String,
}

/// Which contact table a lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRole {
    Architect,
    Contractor,
    Customer,
}

impl ContactRole {
    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            ContactRole::Architect => "architects",
            ContactRole::Contractor => "contractors",
            ContactRole::Customer => "customers",
        }
    }

    /// Primary-key column name
    pub fn id_column(&self) -> &'static str {
        match self {
            ContactRole::Architect => "architect_id",
            ContactRole::Contractor => "contractor_id",
            ContactRole::Customer => "customer_id",
        }
    }

    /// Singular display label
    pub fn label(&self) -> &'static str {
        match self {
            ContactRole::Architect => "architect",
            ContactRole::Contractor => "contractor",
            ContactRole::Customer => "customer",
        }
    }
}

impl std::fmt::Display for ContactRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_table_mapping() {
        assert_eq!(ContactRole::Architect.table(), "architects");
        assert_eq!(ContactRole::Contractor.id_column(), "contractor_id");
        assert_eq!(ContactRole::Customer.label(), "customer");
    }
}
