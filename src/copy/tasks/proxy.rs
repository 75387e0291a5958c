//
//  apim-cli
//  copy/tasks/proxy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use tracing::info;

use crate::copy::CopyContext;
use crate::error::Result;

/// Overwrites the target's proxy/deployment settings with the source's.
pub async fn copy_proxy(ctx: &mut CopyContext) -> Result<()> {
    let proxy = ctx.source.proxy().await?;
    ctx.target.update_proxy(&proxy).await?;
    info!(service = ctx.target.id(), "proxy settings copied");
    Ok(())
}
