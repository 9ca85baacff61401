//! polako-core — Quiz state engine for vocabulary drilling.
//!
//! This crate holds the dictionary index, the per-user record store, task
//! generation and answer checking, scoring, and snapshot persistence. Chat
//! transports sit on top of [`dispatch::Dispatcher`].

pub mod config;
pub mod dictionary;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod model;
pub mod parser;
pub mod persistence;
pub mod statistics;
pub mod store;

pub use dictionary::{Dictionary, DictionaryEntry};
pub use dispatch::{Command, Dispatcher, InboundMessage};
pub use engine::QuizEngine;
pub use error::{PersistError, QuizError};
pub use model::{PersistedState, UserId, UserProfile};
pub use store::UserStore;
