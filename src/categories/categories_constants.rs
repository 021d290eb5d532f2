/// Account classes a simulation can belong to.
///
/// The set is fixed: a category row may only be created with one of these
/// names, and the UI builds its select options from the same list.
pub const ACCOUNT_CLASS_COURANT: &str = "Courant";
pub const ACCOUNT_CLASS_EPARGNE_FINANCIERE: &str = "Epargne Financière";
pub const ACCOUNT_CLASS_ASSURANCE_VIE: &str = "Assurance Vie";
pub const ACCOUNT_CLASS_EPARGNE_ENTREPRISE: &str = "Epargne Entreprise";
pub const ACCOUNT_CLASS_IMMOBILIER: &str = "Immobilier";

pub const ACCOUNT_CLASSES: [&str; 5] = [
    ACCOUNT_CLASS_COURANT,
    ACCOUNT_CLASS_EPARGNE_FINANCIERE,
    ACCOUNT_CLASS_ASSURANCE_VIE,
    ACCOUNT_CLASS_EPARGNE_ENTREPRISE,
    ACCOUNT_CLASS_IMMOBILIER,
];
