// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side functions over a `SQLite` connection.
//!
//! Each mutation writes a single record. Callers that must keep several
//! writes atomic run them inside `Persistence::transaction`.

pub mod accounts;
pub mod assignments;
pub mod audit;
pub mod breakdowns;
pub mod drivers;
pub mod requests;
pub mod shifts;
