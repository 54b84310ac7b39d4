// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side functions over a `SQLite` connection.

pub mod accounts;
pub mod assignments;
pub mod audit;
pub mod breakdowns;
pub mod drivers;
pub mod requests;
pub mod shifts;
