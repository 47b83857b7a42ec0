//! # Repository Layer
//!
//! Per-collection repositories over the document store.
//!
//! ## Design Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                    │
//! │                                                                         │
//! │  Shop layer (engine / view state)                                       │
//! │       │                                                                 │
//! │       │ calls                                                           │
//! │       ▼                                                                 │
//! │  Repository (e.g., ProductRepository)                                   │
//! │       │                                                                 │
//! │       │ maps JSON bodies ◄─► domain types (schema-on-read)              │
//! │       ▼                                                                 │
//! │  DocStore (get / set / delete / list / query_eq)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite documents table                                                 │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Callers never touch raw JSON                                         │
//! │  • Coercion rules live in one place per entity                          │
//! │  • Store failures surface as the domain error taxonomy                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories return `CoreResult<T>`: `DbError` converts at this boundary
//! (NotFound stays NotFound, everything else becomes Transient).

pub mod cart;
pub mod discount;
pub mod order;
pub mod product;
pub mod user;
