//! Roster mutations: whole-group assignment and single attendee
//! assign/unassign. All of them pass through the lock guard.

use crate::core::guard::LockGuard;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_roster_link, insert_roster_link, insert_roster_link_ignore, load_attendee, load_group,
    load_group_members,
};
use crate::errors::{AppError, AppResult};
use crate::models::role::Principal;

pub struct RosterLogic;

impl RosterLogic {
    /// Link every current member of `group_id` to the occurrence.
    /// Returns how many links were newly added; members already on the
    /// roster are not an error.
    pub fn assign_group(
        pool: &mut DbPool,
        id: i64,
        group_id: i64,
        principal: &Principal,
    ) -> AppResult<usize> {
        let tx = pool.transaction()?;

        let occ = LockGuard::load_for_mutation(&tx, id, principal)?;

        let group = load_group(&tx, group_id)?
            .ok_or_else(|| AppError::NotFound(format!("group #{}", group_id)))?;

        let members = load_group_members(&tx, group.id)?;
        if members.is_empty() {
            return Err(AppError::EmptyGroup(group.id));
        }

        let mut added = 0;
        for attendee_id in members {
            if insert_roster_link_ignore(&tx, occ.id, attendee_id)? {
                added += 1;
            }
        }

        ttlog(
            &tx,
            "assign",
            &occ.label(),
            &format!("Group '{}' assigned, {} new attendee(s)", group.name, added),
        )?;

        tx.commit()?;
        Ok(added)
    }

    pub fn assign_attendee(
        pool: &mut DbPool,
        id: i64,
        attendee_id: i64,
        principal: &Principal,
    ) -> AppResult<()> {
        let tx = pool.transaction()?;

        let occ = LockGuard::load_for_mutation(&tx, id, principal)?;
        let attendee = load_attendee(&tx, attendee_id)?
            .ok_or_else(|| AppError::NotFound(format!("attendee #{}", attendee_id)))?;

        insert_roster_link(&tx, occ.id, attendee.id).map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict(format!(
                "{} is already assigned to occurrence #{}",
                attendee.full_name, occ.id
            )),
            other => other,
        })?;

        ttlog(&tx, "assign", &occ.label(), &format!("Assigned {}", attendee.full_name))?;

        tx.commit()?;
        Ok(())
    }

    pub fn unassign_attendee(
        pool: &mut DbPool,
        id: i64,
        attendee_id: i64,
        principal: &Principal,
    ) -> AppResult<()> {
        let tx = pool.transaction()?;

        let occ = LockGuard::load_for_mutation(&tx, id, principal)?;

        if delete_roster_link(&tx, occ.id, attendee_id)? == 0 {
            return Err(AppError::NotFound(format!(
                "attendee #{} on occurrence #{}",
                attendee_id, occ.id
            )));
        }

        ttlog(&tx, "unassign", &occ.label(), &format!("Unassigned attendee #{}", attendee_id))?;

        tx.commit()?;
        Ok(())
    }
}
