#![no_std]

use shared::errors::Error;
use shared::events::{
    KYC_APPROVED, KYC_REVERTED, PAUSED, ROLE_GRANTED, ROLE_REVOKED, UNPAUSED, USER_BLACKLISTED,
    USER_UNBLACKLISTED,
};
use shared::types::Role;
use soroban_sdk::{contract, contractimpl, contractmeta, Address, Env};

mod storage;


use storage::*;

contractmeta!(key = "name", val = "Access Control");

/// Process-wide role registry, KYC registry, blacklist registry and global
/// pause switch. Every other contract in the workspace holds this contract's
/// address and consults it before any state change.
#[contract]
pub struct AccessControl;

#[contractimpl]
impl AccessControl {
    /// Seed the first Admin. Callable exactly once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        set_role(&env, &admin, Role::Admin);
        set_initialized(&env);

        env.events().publish((ROLE_GRANTED,), (admin, Role::Admin));
        Ok(())
    }

    /// Grant `role` to `account`. Admin only; fails on a redundant grant.
    pub fn grant_role(env: Env, caller: Address, account: Address, role: Role) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::Admin, Error::NotAdminManager)?;

        if has_role(&env, &account, role) {
            return Err(Error::RoleAlreadyGranted);
        }
        set_role(&env, &account, role);

        env.events().publish((ROLE_GRANTED,), (account, role));
        Ok(())
    }

    /// Revoke `role` from `account`. Admin only; fails if not held.
    pub fn revoke_role(env: Env, caller: Address, account: Address, role: Role) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::Admin, Error::NotAdminManager)?;

        if !has_role(&env, &account, role) {
            return Err(Error::RoleNotGranted);
        }
        remove_role(&env, &account, role);

        env.events().publish((ROLE_REVOKED,), (account, role));
        Ok(())
    }

    /// Mark `user` as KYC-approved. Edge-triggered: approving an already
    /// approved identity fails.
    pub fn approve_user_kyc(env: Env, caller: Address, user: Address) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::KycManager, Error::NotKycManager)?;

        if is_kyc_approved(&env, &user) {
            return Err(Error::AlreadyKycApproved);
        }
        set_kyc(&env, &user, true);

        env.events().publish((KYC_APPROVED,), user);
        Ok(())
    }

    /// Withdraw `user`'s KYC approval. Fails if never approved.
    pub fn revert_user_kyc(env: Env, caller: Address, user: Address) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::KycManager, Error::NotKycManager)?;

        if !is_kyc_approved(&env, &user) {
            return Err(Error::NotKycApproved);
        }
        set_kyc(&env, &user, false);

        env.events().publish((KYC_REVERTED,), user);
        Ok(())
    }

    /// Blacklist `user`. Fails if already blacklisted.
    pub fn blacklist_user(env: Env, caller: Address, user: Address) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::BlacklistManager, Error::NotBlacklistManager)?;

        if is_blacklisted(&env, &user) {
            return Err(Error::AlreadyBlacklisted);
        }
        set_blacklisted(&env, &user, true);

        env.events().publish((USER_BLACKLISTED,), user);
        Ok(())
    }

    /// Clear `user` from the blacklist. Fails if not blacklisted.
    pub fn un_blacklist_user(env: Env, caller: Address, user: Address) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::BlacklistManager, Error::NotBlacklistManager)?;

        if !is_blacklisted(&env, &user) {
            return Err(Error::NotBlacklisted);
        }
        set_blacklisted(&env, &user, false);

        env.events().publish((USER_UNBLACKLISTED,), user);
        Ok(())
    }

    /// Halt every pause-gated operation platform-wide.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::PauserManager, Error::NotPauserManager)?;

        if is_paused(&env) {
            return Err(Error::AlreadyPaused);
        }
        set_paused(&env, true);

        env.events().publish((PAUSED,), caller);
        Ok(())
    }

    /// Lift the global pause.
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        Self::require_role(&env, &caller, Role::PauserManager, Error::NotPauserManager)?;

        if !is_paused(&env) {
            return Err(Error::NotPaused);
        }
        set_paused(&env, false);

        env.events().publish((UNPAUSED,), caller);
        Ok(())
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        has_role(&env, &account, role)
    }

    pub fn is_kyc_approved(env: Env, user: Address) -> bool {
        is_kyc_approved(&env, &user)
    }

    pub fn is_blacklisted(env: Env, user: Address) -> bool {
        is_blacklisted(&env, &user)
    }

    pub fn is_paused(env: Env) -> bool {
        is_paused(&env)
    }

    fn require_role(env: &Env, caller: &Address, role: Role, err: Error) -> Result<(), Error> {
        caller.require_auth();
        if !has_role(env, caller, role) {
            return Err(err);
        }
        Ok(())
    }
}
