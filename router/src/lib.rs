#![no_std]

use access_control::AccessControlClient;
use shared::errors::Error;
use shared::events::{NEW_ACCESS_CONTROL, NEW_TOKEN_FACTORY};
use shared::types::Role;
use soroban_sdk::{contract, contractimpl, contractmeta, contracttype, Address, Env};
use token_factory::TokenFactoryClient;


contractmeta!(key = "name", val = "Admin Router");

#[contracttype]
#[derive(Clone)]
enum DataKey {
    TokenFactory,
    AccessControl,
}

/// Thin façade for the trusted off-ledger operator: privileged
/// distributions and purchases settled outside the ledger. The router holds
/// the FundsManager role at the access gate; callers must hold Admin.
#[contract]
pub struct Router;

#[contractimpl]
impl Router {
    pub fn initialize(env: Env, token_factory: Address, access_control: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::TokenFactory) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::TokenFactory, &token_factory);
        env.storage().instance().set(&DataKey::AccessControl, &access_control);
        Ok(())
    }

    /// Forward a revenue distribution paid by `caller`. The temporal
    /// preconditions (raise concluded, minimum amount) surface from the
    /// factory.
    pub fn admin_distribution(env: Env, caller: Address, id: u64, amount: i128) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        Self::factory(&env).distribute_revenue(&caller, &id, &amount);
        Ok(())
    }

    /// Credit shares to `on_behalf_of` for a purchase settled off-ledger.
    /// Valid only while the funding window is open.
    pub fn off_chain_buy_tokens(
        env: Env,
        caller: Address,
        id: u64,
        on_behalf_of: Address,
        share_count: i128,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let factory = Self::factory(&env);
        let property = factory.get_property(&id);
        if env.ledger().timestamp() >= property.deadline {
            return Err(Error::TimeNotValid);
        }

        factory.admin_buy_tokens(
            &env.current_contract_address(),
            &id,
            &on_behalf_of,
            &share_count,
        );
        Ok(())
    }

    pub fn set_token_factory(env: Env, caller: Address, factory: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        env.storage().instance().set(&DataKey::TokenFactory, &factory);
        env.events().publish((NEW_TOKEN_FACTORY,), factory);
        Ok(())
    }

    pub fn set_access_control(env: Env, caller: Address, access: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        env.storage().instance().set(&DataKey::AccessControl, &access);
        env.events().publish((NEW_ACCESS_CONTROL,), access);
        Ok(())
    }

    pub fn token_factory_addr(env: Env) -> Address {
        env.storage().instance().get(&DataKey::TokenFactory).unwrap()
    }

    pub fn access_control_addr(env: Env) -> Address {
        env.storage().instance().get(&DataKey::AccessControl).unwrap()
    }

    fn factory(env: &Env) -> TokenFactoryClient {
        TokenFactoryClient::new(env, &Self::token_factory_addr(env.clone()))
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        let access = AccessControlClient::new(env, &Self::access_control_addr(env.clone()));
        if !access.has_role(caller, &Role::Admin) {
            return Err(Error::NotAdminManager);
        }
        Ok(())
    }
}
