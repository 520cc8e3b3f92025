//! Optimistic like/save/follow state for a social client, reconciled
//! against a REST backend.
//!
//! Gestures go through [`actions::Dispatcher`], which writes the expected
//! value to the [`store::SharedStore`] before the request leaves. The
//! [`reconcile::Reconciler`] then keeps it, corrects it with server values,
//! or restores the snapshot.

pub mod actions;
pub mod api;
pub mod app;
pub mod cancel;
pub mod config;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod view;
