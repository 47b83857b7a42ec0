//! # gamerzone-shop: Storefront Orchestration for Gamer Zone
//!
//! The layer between the UI and the stores: cart mutations, discount
//! application, checkout, session identity, and the decorative FX quote.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Gamer Zone Shop Flow                              │
//! │                                                                         │
//! │  Screen action (add to cart, apply code, checkout)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  gamerzone-shop (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐  │   │
//! │  │   │  CartState   │──►│  CartEngine  │   │ SessionProvider  │  │   │
//! │  │   │  (state.rs)  │   │ (engine.rs)  │   │  (session.rs)    │  │   │
//! │  │   │              │   │              │   │                  │  │   │
//! │  │   │ discounts,   │   │ load/mutate/ │   │ who is buying?   │  │   │
//! │  │   │ totals, UI   │   │ checkout     │   │                  │  │   │
//! │  │   └──────────────┘   └──────┬───────┘   └──────────────────┘  │   │
//! │  │                             │                                  │   │
//! │  │   ┌──────────────┐          │                                  │   │
//! │  │   │   FxClient   │          │  (decorative, off the hot path)  │   │
//! │  │   │   (fx.rs)    │          │                                  │   │
//! │  │   └──────────────┘          │                                  │   │
//! │  └─────────────────────────────┼──────────────────────────────────┘   │
//! │                                ▼                                        │
//! │              gamerzone-db (repositories over the document store)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - The cart engine: per-user cart mutations and checkout
//! - [`state`] - The cart view state: discounts, totals, checkout surface
//! - [`session`] - The session-identity boundary
//! - [`fx`] - The decorative USD/CLP quote client

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod fx;
pub mod session;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::CartEngine;
pub use fx::{FxClient, FxConfig, FxQuote};
pub use session::{MemorySession, SessionProvider};
pub use state::{AppliedDiscount, CartState, CartUiState};
