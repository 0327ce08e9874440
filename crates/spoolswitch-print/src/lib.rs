// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// spoolswitch print — printer directive parsing, legacy-codepage spool
// files, retry policy and the dispatcher that ties them to the platform
// bridge.

pub mod directive;
pub mod dispatcher;
pub mod encoding;
pub mod retry;
pub mod spool;

pub use directive::PrintRequest;
pub use dispatcher::PrintDispatcher;
pub use encoding::LegacyEncoder;
pub use retry::{Pause, ThreadPause};
pub use spool::SpoolFile;
