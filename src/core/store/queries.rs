//! Data-access operations
//!
//! One method per use case. Each acquires its own connection, runs a single
//! parameterized statement, and maps rows back to entity records. Point
//! lookups return `Ok(None)` when nothing matches; mutations return the
//! affected-row count, where zero means the project number was absent.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::types::{date_column, opt_date_column, ProjectSummary};
use super::{ProjectStore, StoreError};
use crate::entities::{Contact, ContactRole, Project, ProjectDetail};

/// Map a contact row (id, name, phone, email, address)
fn map_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        name: row.get(1)?,
        phone_number: row.get(2)?,
        email: row.get(3)?,
        physical_address: row.get(4)?,
    })
}

/// Map a full project row in schema column order
fn map_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        number: row.get(1)?,
        name: row.get(2)?,
        building_type: row.get(3)?,
        address: row.get(4)?,
        erf_number: row.get(5)?,
        total_fee: row.get(6)?,
        amount_paid: row.get(7)?,
        deadline: date_column(8, row.get(8)?)?,
        completion_date: opt_date_column(9, row.get(9)?)?,
        architect_id: row.get(10)?,
        contractor_id: row.get(11)?,
        customer_id: row.get(12)?,
    })
}

const PROJECT_COLUMNS: &str = "project_id, project_number, project_name, building_type, \
     address, erf_number, total_fee, amount_paid, deadline, completion_date, \
     architect_id, contractor_id, customer_id";

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl ProjectStore {
    /// Insert a new project, returning its store-assigned id
    ///
    /// The caller-supplied `id` is ignored and `completion_date` starts
    /// NULL. No duplicate detection on the project number.
    pub fn add_project(&self, project: &Project) -> Result<i64, StoreError> {
        let conn = self.acquire()?;
        conn.execute(
            "INSERT INTO projects (project_number, project_name, building_type, address, \
             erf_number, total_fee, amount_paid, deadline, architect_id, contractor_id, \
             customer_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                project.number,
                project.name,
                project.building_type,
                project.address,
                project.erf_number,
                project.total_fee,
                project.amount_paid,
                iso(project.deadline),
                project.architect_id,
                project.contractor_id,
                project.customer_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Full-row update keyed by project number
    ///
    /// Rewrites every scalar field, the nullable completion date, and all
    /// three relation ids. Returns the affected-row count; zero means no
    /// project carries that number.
    pub fn update_project(&self, project: &Project) -> Result<usize, StoreError> {
        let conn = self.acquire()?;
        let rows = conn.execute(
            "UPDATE projects SET project_name = ?1, building_type = ?2, address = ?3, \
             erf_number = ?4, total_fee = ?5, amount_paid = ?6, deadline = ?7, \
             completion_date = ?8, architect_id = ?9, contractor_id = ?10, \
             customer_id = ?11 WHERE project_number = ?12",
            params![
                project.name,
                project.building_type,
                project.address,
                project.erf_number,
                project.total_fee,
                project.amount_paid,
                iso(project.deadline),
                project.completion_date.map(iso),
                project.architect_id,
                project.contractor_id,
                project.customer_id,
                project.number,
            ],
        )?;
        Ok(rows)
    }

    /// Delete the project with the given number (zero rows = absent)
    pub fn delete_project(&self, number: i64) -> Result<usize, StoreError> {
        let conn = self.acquire()?;
        let rows = conn.execute(
            "DELETE FROM projects WHERE project_number = ?1",
            params![number],
        )?;
        Ok(rows)
    }

    /// Set the completion date, touching no other column
    ///
    /// There is no already-finalized guard: calling twice simply overwrites
    /// the date. Returns the affected-row count.
    pub fn finalize_project(&self, number: i64, date: NaiveDate) -> Result<usize, StoreError> {
        let conn = self.acquire()?;
        let rows = conn.execute(
            "UPDATE projects SET completion_date = ?1 WHERE project_number = ?2",
            params![iso(date), number],
        )?;
        Ok(rows)
    }

    /// All projects with no completion date, as display summaries
    pub fn list_incomplete(&self) -> Result<Vec<ProjectSummary>, StoreError> {
        self.list_summaries("SELECT project_number, project_name, building_type, address, deadline \
             FROM projects WHERE completion_date IS NULL ORDER BY project_number")
    }

    /// Unfinished projects whose deadline is strictly before today
    ///
    /// "Today" is evaluated by the store at query time.
    pub fn list_overdue(&self) -> Result<Vec<ProjectSummary>, StoreError> {
        self.list_summaries(
            "SELECT project_number, project_name, building_type, address, deadline \
             FROM projects WHERE deadline < date('now') AND completion_date IS NULL \
             ORDER BY project_number",
        )
    }

    fn list_summaries(&self, sql: &str) -> Result<Vec<ProjectSummary>, StoreError> {
        let conn = self.acquire()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(ProjectSummary {
                number: row.get(0)?,
                name: row.get(1)?,
                building_type: row.get(2)?,
                address: row.get(3)?,
                deadline: date_column(4, row.get(4)?)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::from)
    }

    /// Insert a contact into the role's table, returning its assigned id
    pub fn add_contact(&self, role: ContactRole, contact: &Contact) -> Result<i64, StoreError> {
        let conn = self.acquire()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (name, phone_number, email, physical_address) \
                 VALUES (?1, ?2, ?3, ?4)",
                role.table()
            ),
            params![
                contact.name,
                contact.phone_number,
                contact.email,
                contact.physical_address,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Point lookup of a contact by id in the role's table
    pub fn find_contact(
        &self,
        role: ContactRole,
        id: i64,
    ) -> Result<Option<Contact>, StoreError> {
        let conn = self.acquire()?;
        self.find_contact_with(&conn, role, id)
    }

    fn find_contact_with(
        &self,
        conn: &rusqlite::Connection,
        role: ContactRole,
        id: i64,
    ) -> Result<Option<Contact>, StoreError> {
        conn.query_row(
            &format!(
                "SELECT {}, name, phone_number, email, physical_address FROM {} \
                 WHERE {} = ?1",
                role.id_column(),
                role.table(),
                role.id_column()
            ),
            params![id],
            map_contact,
        )
        .optional()
        .map_err(StoreError::from)
    }

    /// All contacts in the role's table, ordered by id
    pub fn list_contacts(&self, role: ContactRole) -> Result<Vec<Contact>, StoreError> {
        let conn = self.acquire()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, name, phone_number, email, physical_address FROM {} ORDER BY {}",
            role.id_column(),
            role.table(),
            role.id_column()
        ))?;
        let rows = stmt.query_map([], map_contact)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::from)
    }

    /// Point lookup by project number, with relations resolved
    pub fn find_project_by_number(
        &self,
        number: i64,
    ) -> Result<Option<ProjectDetail>, StoreError> {
        self.find_project("project_number = ?1", params![number])
    }

    /// Point lookup by project name, with relations resolved
    pub fn find_project_by_name(&self, name: &str) -> Result<Option<ProjectDetail>, StoreError> {
        self.find_project("project_name = ?1", params![name])
    }

    /// Shared lookup: fetch the project row, then resolve the three
    /// contacts with follow-up point lookups on the same connection.
    fn find_project(
        &self,
        predicate: &str,
        args: impl rusqlite::Params,
    ) -> Result<Option<ProjectDetail>, StoreError> {
        let conn = self.acquire()?;
        let project = conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE {predicate}"),
                args,
                map_project,
            )
            .optional()?;

        let Some(project) = project else {
            return Ok(None);
        };

        let architect = self.find_contact_with(&conn, ContactRole::Architect, project.architect_id)?;
        let contractor =
            self.find_contact_with(&conn, ContactRole::Contractor, project.contractor_id)?;
        let customer = self.find_contact_with(&conn, ContactRole::Customer, project.customer_id)?;

        Ok(Some(ProjectDetail {
            project,
            architect,
            contractor,
            customer,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Money;
    use chrono::Local;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, ProjectStore) {
        let tmp = TempDir::new().unwrap();
        let store = ProjectStore::open(&tmp.path().join("poised.db")).unwrap();
        (tmp, store)
    }

    fn seed_contact(store: &ProjectStore, role: ContactRole, name: &str) -> i64 {
        store
            .add_contact(
                role,
                &Contact {
                    id: 0,
                    name: name.to_string(),
                    phone_number: "555-0100".to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    physical_address: "1 Main Rd".to_string(),
                },
            )
            .unwrap()
    }

    fn riverside(store: &ProjectStore) -> Project {
        let architect_id = seed_contact(store, ContactRole::Architect, "Ada");
        let contractor_id = seed_contact(store, ContactRole::Contractor, "Bob");
        let customer_id = seed_contact(store, ContactRole::Customer, "Cara");
        Project {
            id: 0,
            number: 100,
            name: "Riverside House".to_string(),
            building_type: "House".to_string(),
            address: "12 River Rd".to_string(),
            erf_number: "ERF-9920".to_string(),
            total_fee: "500000".parse::<Money>().unwrap(),
            amount_paid: "200000".parse::<Money>().unwrap(),
            deadline: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            completion_date: None,
            architect_id,
            contractor_id,
            customer_id,
        }
    }

    #[test]
    fn test_add_then_find_by_number_round_trips() {
        let (_tmp, store) = test_store();
        let project = riverside(&store);
        let id = store.add_project(&project).unwrap();
        assert!(id > 0);

        let found = store.find_project_by_number(100).unwrap().unwrap();
        assert_eq!(found.project.id, id);
        assert_eq!(found.project.number, 100);
        assert_eq!(found.project.name, "Riverside House");
        assert_eq!(found.project.erf_number, "ERF-9920");
        assert_eq!(found.project.total_fee, Money::from_cents(50_000_000));
        assert_eq!(found.project.amount_paid, Money::from_cents(20_000_000));
        assert_eq!(found.project.deadline, project.deadline);
        assert_eq!(found.project.completion_date, None);
        assert_eq!(found.project.architect_id, project.architect_id);
        assert_eq!(found.project.contractor_id, project.contractor_id);
        assert_eq!(found.project.customer_id, project.customer_id);
        assert_eq!(found.architect.unwrap().name, "Ada");
        assert_eq!(found.contractor.unwrap().name, "Bob");
        assert_eq!(found.customer.unwrap().name, "Cara");
    }

    #[test]
    fn test_find_by_name_resolves_relations() {
        let (_tmp, store) = test_store();
        store.add_project(&riverside(&store)).unwrap();

        let found = store
            .find_project_by_name("Riverside House")
            .unwrap()
            .unwrap();
        assert_eq!(found.project.number, 100);
        assert!(found.architect.is_some());

        assert!(store.find_project_by_name("No Such House").unwrap().is_none());
    }

    #[test]
    fn test_update_missing_number_affects_zero_rows() {
        let (_tmp, store) = test_store();
        let mut project = riverside(&store);
        store.add_project(&project).unwrap();

        project.number = 999;
        project.name = "Ghost".to_string();
        assert_eq!(store.update_project(&project).unwrap(), 0);

        // The stored row is unchanged
        let found = store.find_project_by_number(100).unwrap().unwrap();
        assert_eq!(found.project.name, "Riverside House");
    }

    #[test]
    fn test_update_rewrites_full_row() {
        let (_tmp, store) = test_store();
        let mut project = riverside(&store);
        store.add_project(&project).unwrap();

        project.name = "Riverside Lodge".to_string();
        project.amount_paid = "250000.50".parse::<Money>().unwrap();
        project.completion_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(store.update_project(&project).unwrap(), 1);

        let found = store.find_project_by_number(100).unwrap().unwrap();
        assert_eq!(found.project.name, "Riverside Lodge");
        assert_eq!(found.project.amount_paid, Money::from_cents(25_000_050));
        assert_eq!(
            found.project.completion_date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_finalize_overwrites_on_repeat() {
        let (_tmp, store) = test_store();
        store.add_project(&riverside(&store)).unwrap();

        let d1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        assert_eq!(store.finalize_project(100, d1).unwrap(), 1);
        assert_eq!(store.finalize_project(100, d2).unwrap(), 1);

        let found = store.find_project_by_number(100).unwrap().unwrap();
        assert_eq!(found.project.completion_date, Some(d2));
    }

    #[test]
    fn test_finalize_missing_number_affects_zero_rows() {
        let (_tmp, store) = test_store();
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(store.finalize_project(42, date).unwrap(), 0);
    }

    #[test]
    fn test_list_incomplete_excludes_finalized() {
        let (_tmp, store) = test_store();
        let mut project = riverside(&store);
        store.add_project(&project).unwrap();
        project.number = 101;
        project.name = "Hillside Flats".to_string();
        store.add_project(&project).unwrap();

        let incomplete = store.list_incomplete().unwrap();
        assert_eq!(incomplete.len(), 2);

        store
            .finalize_project(100, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .unwrap();
        let incomplete = store.list_incomplete().unwrap();
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].number, 101);
        assert_eq!(incomplete[0].name, "Hillside Flats");
    }

    #[test]
    fn test_list_overdue_filters_deadline_and_completion() {
        let (_tmp, store) = test_store();
        let mut project = riverside(&store);
        // Past deadline, incomplete: overdue
        store.add_project(&project).unwrap();

        // Future deadline: never overdue
        project.number = 101;
        project.deadline = Local::now().date_naive() + chrono::Duration::days(30);
        store.add_project(&project).unwrap();

        // Past deadline but finalized: not overdue
        project.number = 102;
        project.deadline = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        store.add_project(&project).unwrap();
        store
            .finalize_project(102, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .unwrap();

        let overdue = store.list_overdue().unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].number, 100);
    }

    #[test]
    fn test_delete_removes_exactly_one_row() {
        let (_tmp, store) = test_store();
        store.add_project(&riverside(&store)).unwrap();

        assert_eq!(store.delete_project(100).unwrap(), 1);
        assert!(store.find_project_by_number(100).unwrap().is_none());
        assert_eq!(store.delete_project(100).unwrap(), 0);
    }

    #[test]
    fn test_find_contact_not_found_is_none() {
        let (_tmp, store) = test_store();
        assert!(store
            .find_contact(ContactRole::Architect, 99)
            .unwrap()
            .is_none());

        let id = seed_contact(&store, ContactRole::Architect, "Ada");
        let found = store.find_contact(ContactRole::Architect, id).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, "Ada");
    }

    #[test]
    fn test_list_contacts_per_role() {
        let (_tmp, store) = test_store();
        seed_contact(&store, ContactRole::Customer, "Cara");
        seed_contact(&store, ContactRole::Customer, "Dan");
        seed_contact(&store, ContactRole::Architect, "Ada");

        let customers = store.list_contacts(ContactRole::Customer).unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name, "Cara");
        assert_eq!(store.list_contacts(ContactRole::Contractor).unwrap().len(), 0);
    }

    #[test]
    fn test_riverside_scenario_end_to_end() {
        let (_tmp, store) = test_store();
        store.add_project(&riverside(&store)).unwrap();

        let found = store.find_project_by_number(100).unwrap().unwrap();
        assert_eq!(found.project.amount_paid.to_string(), "200000.00");
        assert_eq!(found.project.completion_date, None);

        let done = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        store.finalize_project(100, done).unwrap();

        let found = store.find_project_by_number(100).unwrap().unwrap();
        assert_eq!(found.project.completion_date, Some(done));
        assert!(store
            .list_incomplete()
            .unwrap()
            .iter()
            .all(|p| p.number != 100));
    }
}
