//! Document table migration.
//!
//! Creates `crm_documents` with the unique keys the stores enforce.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS crm_documents CASCADE;")
            .await?;
        Ok(())
    }
}

const DOCUMENTS_SQL: &str = r"
CREATE TABLE crm_documents (
    collection VARCHAR(32) NOT NULL,
    id VARCHAR(128) NOT NULL,
    body JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, id),
    CONSTRAINT chk_collection CHECK (
        collection IN ('users', 'campaigns', 'leads', 'fundraisers', 'payments', 'calls', 'sessions')
    ),
    CONSTRAINT chk_body_object CHECK (jsonb_typeof(body) = 'object'),
    CONSTRAINT chk_body_id CHECK (body->>'id' = id)
);

CREATE INDEX idx_crm_documents_order ON crm_documents (collection, created_at, id);

-- One payment per gateway payment id
CREATE UNIQUE INDEX uq_crm_payments_external_id
    ON crm_documents ((btrim(body->>'externalPaymentId')))
    WHERE collection = 'payments' AND btrim(coalesce(body->>'externalPaymentId', '')) <> '';

-- One user per email, case-insensitively
CREATE UNIQUE INDEX uq_crm_users_email
    ON crm_documents ((lower(btrim(body->>'email'))))
    WHERE collection = 'users';
";
