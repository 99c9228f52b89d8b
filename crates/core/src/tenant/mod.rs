//! Tenant settings provider.
//!
//! The lifecycle manager never reads tenant configuration from a blob of
//! settings; it asks this provider for exactly the two pieces it needs:
//! the tax configuration and the default currency.

use dashmap::DashMap;
use faktura_shared::{Currency, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax configuration for a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Whether tax is applied to documents at all.
    pub enabled: bool,
    /// Tax rate as a percentage (e.g., 10 for 10%).
    pub rate_percent: Decimal,
    /// Display name of the tax (e.g., "VAT", "GST").
    pub name: String,
}

impl TaxConfig {
    /// A disabled tax configuration (no tax applied).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rate_percent: Decimal::ZERO,
            name: String::new(),
        }
    }
}

/// Complete per-tenant configuration the core consumes.
#[derive(Debug, Clone)]
pub struct TenantProfile {
    /// The tenant's default currency for new documents.
    pub currency: Currency,
    /// The tenant's tax configuration.
    pub tax: TaxConfig,
}

/// Provider of per-tenant configuration.
///
/// Returning `None` means the tenant has not completed onboarding; the
/// lifecycle manager surfaces this as `TenantConfigMissing` and creates
/// nothing.
pub trait TenantSettings {
    /// Returns the tenant's tax configuration, if the tenant is known.
    fn tax_config(&self, tenant: TenantId) -> Option<TaxConfig>;

    /// Returns the tenant's default currency, if the tenant is known.
    fn currency(&self, tenant: TenantId) -> Option<Currency>;
}

impl<T: TenantSettings> TenantSettings for std::sync::Arc<T> {
    fn tax_config(&self, tenant: TenantId) -> Option<TaxConfig> {
        (**self).tax_config(tenant)
    }

    fn currency(&self, tenant: TenantId) -> Option<Currency> {
        (**self).currency(tenant)
    }
}

/// In-memory tenant settings, for tests and embedding.
#[derive(Debug, Default)]
pub struct StaticTenantSettings {
    profiles: DashMap<TenantId, TenantProfile>,
}

impl StaticTenantSettings {
    /// Creates an empty settings provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a tenant's profile.
    pub fn insert(&self, tenant: TenantId, profile: TenantProfile) {
        self.profiles.insert(tenant, profile);
    }

    /// Replaces only the tax configuration for a tenant.
    ///
    /// Has no effect if the tenant is unknown. Used when a tenant changes
    /// the tax rate mid-flight; already-created documents are not touched.
    pub fn set_tax_config(&self, tenant: TenantId, tax: TaxConfig) {
        if let Some(mut profile) = self.profiles.get_mut(&tenant) {
            profile.tax = tax;
        }
    }
}

impl TenantSettings for StaticTenantSettings {
    fn tax_config(&self, tenant: TenantId) -> Option<TaxConfig> {
        self.profiles.get(&tenant).map(|p| p.tax.clone())
    }

    fn currency(&self, tenant: TenantId) -> Option<Currency> {
        self.profiles.get(&tenant).map(|p| p.currency)
    }
}
