//
//  apim-cli
//  copy/tasks/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The individual steps of the copy pipeline, one module per sub-resource.
//! Each task takes the shared [`CopyContext`](super::CopyContext) and is
//! idempotent on its own: it diffs the target against the source and only
//! creates what is missing.

mod limits;
mod mapping_rules;
mod methods;
mod metrics;
mod plans;
mod proxy;

pub use limits::copy_limits;
pub use mapping_rules::{copy_mapping_rules, destroy_mapping_rules};
pub use methods::copy_methods;
pub use metrics::copy_metrics;
pub use plans::copy_application_plans;
pub use proxy::copy_proxy;
