pub(crate) mod alpha_vantage_provider;
