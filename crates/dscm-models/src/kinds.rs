//! # Closed Vocabularies
//!
//! Small string-valued enums shared by pipeline, connector and scheduling
//! services. Each serializes as its snake_case identifier, parses back with
//! [`FromStr`], and lists its members with `all()`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::ModelError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Returns every member in canonical order.
            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }

            /// Wire identifier for this member.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ModelError::unknown($kind, other)),
                }
            }
        }
    };
}

vocabulary! {
    /// Kind of executable unit a job runs as.
    ComputingBlock, "computing block" {
        Workflow => "workflow",
        Pipeline => "pipeline",
        Clone => "clone",
    }
}

vocabulary! {
    /// SQL dialect of a connected database.
    DatabaseDialect, "database dialect" {
        Postgres => "postgres",
        MySql => "mysql",
        /// Microsoft SQL Server, also known as mssql.
        SqlServer => "sqlserver",
        Sqlite => "sqlite",
        Snowflake => "snowflake",
        BigQuery => "bigquery",
        Redshift => "redshift",
        Oracle => "oracle",
        DuckDb => "duckdb",
        Trino => "trino",
    }
}

vocabulary! {
    /// What starts a run.
    TriggerType, "trigger type" {
        Manual => "manual",
        Webhook => "webhook",
        Schedule => "schedule",
    }
}

vocabulary! {
    /// Compute size requested for a run.
    ResourceSize, "resource size" {
        Small => "small",
        Medium => "medium",
        Large => "large",
        /// Let the platform pick.
        Default => "default",
    }
}
