pub mod checkout_service;
pub mod package_service;
pub mod payment;
pub mod pricing_service;
pub mod selection_validation;
pub mod stripe;
pub mod tariff;
