// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Engine-agnostic application layer: canonical entities, capability
//! ports, the classified error taxonomy, and the facade that selects one
//! backend's providers at startup.

pub mod errors;
pub mod facade;
pub mod model;
pub mod ports;
