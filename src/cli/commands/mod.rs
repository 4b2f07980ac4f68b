pub mod add;
pub mod assign;
pub mod attend;
pub mod attendee;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod generate;
pub mod group;
pub mod init;
pub mod list;
pub mod lock;
pub mod log;
pub mod report;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database with its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
