// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for document storage | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SESSION_SECRET` | HS256 signing secret for session tokens | Required; tokens rejected without it |
//! | `SEED_ADMIN_EMAIL` | Email for the bootstrap admin account | Optional |
//! | `SEED_ADMIN_PASSWORD` | Password for the bootstrap admin account | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the document storage directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default document storage directory.
pub const DEFAULT_DATA_DIR: &str = "/data";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Default server bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Default server bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable name for the session signing secret.
///
/// Without it the server still starts (health endpoints report the
/// degraded state) but the session reader fails closed and rejects every
/// token.
pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";

/// Environment variable names for the bootstrap admin account.
///
/// When both are set and the email is not yet registered, an admin
/// student record is created at startup.
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

/// Environment variable name for the logging format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
