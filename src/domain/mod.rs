//! Domain Layer
//!
//! Pure reconciliation logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Registry and compose document
//! - `services/` - Reconciliation planner
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
