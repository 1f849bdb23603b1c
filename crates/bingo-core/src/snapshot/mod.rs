//! Board persistence format.
//!
//! A [`BoardSnapshot`](record::BoardSnapshot) is the JSON document stored per
//! user:
//!
//! ```json
//! {
//!   "cells": [{ "name": "Jon Rahm", "salary": 12000 }, null, ...],
//!   "usedNames": ["Jon Rahm"],
//!   "lastSaved": "2026-04-10T18:30:00Z"
//! }
//! ```
//!
//! `cells` always has 25 entries.  `usedNames` is redundant with `cells` and
//! is written for readers that only want the drafted list; on load it is
//! required and must agree with the cells.

pub mod codec;
pub mod record;
