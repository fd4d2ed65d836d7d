// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth_form;
pub mod dashboard;
pub mod shell;
pub mod transaction_form;
pub mod transaction_list;

pub use auth_form::AuthForm;
pub use dashboard::Dashboard;
pub use shell::{RootShell, Screen};
pub use transaction_form::{TransactionDraft, TransactionForm};
pub use transaction_list::TransactionList;
