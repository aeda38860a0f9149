use crate::models::quote::Package;
use crate::models::selection::{ArtistTier, BookingSelection};
use crate::services::pricing_service::PricingService;

pub struct PackageService;

impl PackageService {
    /// Build the Lead and Team offers shown side by side on the quote page.
    ///
    /// Always returns both packages. Without a selection they are zero priced
    /// with no services listed.
    pub fn derive_packages(
        pricing: &PricingService,
        selection: Option<&BookingSelection>,
    ) -> [Package; 2] {
        ArtistTier::ALL.map(|tier| Self::package_for(pricing, selection, tier))
    }

    fn package_for(
        pricing: &PricingService,
        selection: Option<&BookingSelection>,
        tier: ArtistTier,
    ) -> Package {
        let (price, deposit, services) = match pricing.calculate_price(selection, tier) {
            Some(result) => (result.total, result.deposit, result.line_items),
            None => (0.0, 0.0, Vec::new()),
        };

        let (id, name, description) = match tier {
            ArtistTier::Lead => (
                "lead-artist",
                "Lead Artist",
                "Every service performed personally by our lead artist.",
            ),
            ArtistTier::Team => (
                "team",
                "Team",
                "Every service performed by a senior artist from our team.",
            ),
        };

        Package {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            deposit,
            services,
        }
    }
}
