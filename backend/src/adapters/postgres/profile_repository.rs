//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::profile::{ContactChannel, PhoneNumber, Preferences, Profile};
use crate::ports::ProfileRepository;

use super::support::{parse_column, user_id_from_column};

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    full_name: String,
    phone: Option<String>,
    email: String,
    contact_channel: String,
    marketing_opt_in: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let contact_channel: ContactChannel = parse_column("contact_channel", &row.contact_channel)?;
        let phone = row
            .phone
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|e| DomainError::database("Invalid phone", e))?;

        Ok(Profile::reconstitute(
            user_id_from_column(row.user_id)?,
            row.full_name,
            phone,
            row.email,
            Preferences {
                contact_channel,
                marketing_opt_in: row.marketing_opt_in,
            },
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT user_id, full_name, phone, email, contact_channel, marketing_opt_in,
                   created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find profile", e))?;

        row.map(Profile::try_from).transpose()
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id, full_name, phone, email, contact_channel, marketing_opt_in,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                contact_channel = EXCLUDED.contact_channel,
                marketing_opt_in = EXCLUDED.marketing_opt_in,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(profile.full_name())
        .bind(profile.phone().map(|p| p.as_str()))
        .bind(profile.email())
        .bind(profile.preferences().contact_channel.as_str())
        .bind(profile.preferences().marketing_opt_in)
        .bind(profile.created_at().as_datetime())
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save profile", e))?;

        Ok(())
    }

    async fn find_marketing_recipients(&self) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(
            r#"
            SELECT user_id, full_name, phone, email, contact_channel, marketing_opt_in,
                   created_at, updated_at
            FROM profiles
            WHERE marketing_opt_in
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list marketing recipients", e))?;

        rows.into_iter().map(Profile::try_from).collect()
    }
}
