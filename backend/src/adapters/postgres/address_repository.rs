//! PostgreSQL implementation of AddressRepository.
//!
//! `create` and `set_default` clear the previous default and set the new one
//! inside a single transaction; the partial unique index on `(customer_id)
//! WHERE is_default` backs the one-default invariant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::address::{Address, PostalCode, UnitNumber};
use crate::domain::foundation::{AddressId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::region::Region;
use crate::ports::AddressRepository;

use super::support::{begin, commit, parse_column, user_id_from_column};

pub struct PostgresAddressRepository {
    pool: PgPool,
}

impl PostgresAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: Uuid,
    customer_id: String,
    label: String,
    street: String,
    unit_number: Option<String>,
    postal_code: String,
    region: String,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AddressRow> for Address {
    type Error = DomainError;

    fn try_from(row: AddressRow) -> Result<Self, Self::Error> {
        let region: Region = parse_column("region", &row.region)?;
        let postal_code = PostalCode::new(row.postal_code)
            .map_err(|e| DomainError::database("Invalid postal_code", e))?;
        let unit_number = row
            .unit_number
            .map(UnitNumber::new)
            .transpose()
            .map_err(|e| DomainError::database("Invalid unit_number", e))?;

        Ok(Address::reconstitute(
            AddressId::from_uuid(row.id),
            user_id_from_column(row.customer_id)?,
            row.label,
            row.street,
            unit_number,
            postal_code,
            region,
            row.is_default,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

fn not_found(id: &AddressId) -> DomainError {
    DomainError::new(ErrorCode::AddressNotFound, format!("Address {} not found", id))
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn save(&self, address: &Address) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO addresses (
                id, customer_id, label, street, unit_number, postal_code, region,
                is_default, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                label = EXCLUDED.label,
                street = EXCLUDED.street,
                unit_number = EXCLUDED.unit_number,
                postal_code = EXCLUDED.postal_code,
                region = EXCLUDED.region,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(address.id().as_uuid())
        .bind(address.customer_id().as_str())
        .bind(address.label())
        .bind(address.street())
        .bind(address.unit_number().map(|u| u.as_str()))
        .bind(address.postal_code().as_str())
        .bind(address.region().as_str())
        .bind(address.is_default())
        .bind(address.created_at().as_datetime())
        .bind(address.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save address", e))?;

        Ok(())
    }

    async fn create(&self, address: &Address, make_default: bool) -> Result<Address, DomainError> {
        let mut tx = begin(&self.pool).await?;
        let customer_id = address.customer_id().as_str();

        // Held until commit; serialises creates for one customer.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(customer_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock customer addresses", e))?;

        let (has_any,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM addresses WHERE customer_id = $1)")
                .bind(customer_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to count addresses", e))?;

        let mut created = address.clone();
        if make_default || !has_any {
            sqlx::query(
                r#"
                UPDATE addresses SET is_default = FALSE, updated_at = NOW()
                WHERE customer_id = $1 AND is_default
                "#,
            )
            .bind(customer_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear default address", e))?;
            created.set_default();
        }

        sqlx::query(
            r#"
            INSERT INTO addresses (
                id, customer_id, label, street, unit_number, postal_code, region,
                is_default, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(created.id().as_uuid())
        .bind(customer_id)
        .bind(created.label())
        .bind(created.street())
        .bind(created.unit_number().map(|u| u.as_str()))
        .bind(created.postal_code().as_str())
        .bind(created.region().as_str())
        .bind(created.is_default())
        .bind(created.created_at().as_datetime())
        .bind(created.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to create address", e))?;

        commit(tx).await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &AddressId) -> Result<Option<Address>, DomainError> {
        let row: Option<AddressRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, label, street, unit_number, postal_code, region,
                   is_default, created_at, updated_at
            FROM addresses
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find address", e))?;

        row.map(Address::try_from).transpose()
    }

    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Address>, DomainError> {
        let rows: Vec<AddressRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, label, street, unit_number, postal_code, region,
                   is_default, created_at, updated_at
            FROM addresses
            WHERE customer_id = $1
            ORDER BY is_default DESC, created_at ASC
            "#,
        )
        .bind(customer_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list addresses", e))?;

        rows.into_iter().map(Address::try_from).collect()
    }

    async fn set_default(&self, customer_id: &UserId, id: &AddressId) -> Result<Address, DomainError> {
        let mut tx = begin(&self.pool).await?;

        sqlx::query(
            r#"
            UPDATE addresses SET is_default = FALSE, updated_at = NOW()
            WHERE customer_id = $1 AND is_default AND id <> $2
            "#,
        )
        .bind(customer_id.as_str())
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to clear default address", e))?;

        let row: Option<AddressRow> = sqlx::query_as(
            r#"
            UPDATE addresses SET is_default = TRUE, updated_at = NOW()
            WHERE id = $1 AND customer_id = $2
            RETURNING id, customer_id, label, street, unit_number, postal_code, region,
                      is_default, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(customer_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to set default address", e))?;

        // Dropping `tx` without commit rolls back the clear above.
        let row = row.ok_or_else(|| not_found(id))?;
        commit(tx).await?;
        Address::try_from(row)
    }

    async fn delete(&self, id: &AddressId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete address", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_address() {
        let row = AddressRow {
            id: Uuid::new_v4(),
            customer_id: "user-1".to_string(),
            label: "Home".to_string(),
            street: "Blk 123 Bedok North Ave 1".to_string(),
            unit_number: Some("#05-123".to_string()),
            postal_code: "460123".to_string(),
            region: "east".to_string(),
            is_default: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let address = Address::try_from(row).unwrap();
        assert_eq!(address.region(), Region::East);
        assert!(address.is_default());
        assert_eq!(address.unit_number().map(|u| u.as_str()), Some("#05-123"));
    }

    #[test]
    fn corrupt_postal_code_is_database_error() {
        let row = AddressRow {
            id: Uuid::new_v4(),
            customer_id: "user-1".to_string(),
            label: "Home".to_string(),
            street: "Somewhere".to_string(),
            unit_number: None,
            postal_code: "12AB".to_string(),
            region: "central".to_string(),
            is_default: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(Address::try_from(row).unwrap_err().code, ErrorCode::DatabaseError);
    }
}
