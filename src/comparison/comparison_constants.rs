/// Chart.js default palette, cycled over datasets in order.
///
/// Pairs of (border, background). The assignment is positional only; no
/// meaning is attached to a particular color.
pub const CHART_COLORS: [(&str, &str); 6] = [
    ("rgb(54, 162, 235)", "rgba(54, 162, 235, 0.2)"),   // blue
    ("rgb(255, 99, 132)", "rgba(255, 99, 132, 0.2)"),   // red
    ("rgb(255, 206, 86)", "rgba(255, 206, 86, 0.2)"),   // yellow
    ("rgb(75, 192, 192)", "rgba(75, 192, 192, 0.2)"),   // green
    ("rgb(153, 102, 255)", "rgba(153, 102, 255, 0.2)"), // purple
    ("rgb(255, 159, 64)", "rgba(255, 159, 64, 0.2)"),   // orange
];

pub const CHART_BORDER_WIDTH: u32 = 2;

/// Dash pattern used for inflation-adjusted series.
pub const CHART_ADJUSTED_DASH: [u32; 2] = [5, 5];

pub const LABEL_ALL_ACCOUNTS_TOTAL: &str = "Total tous comptes";
pub const LABEL_ALL_CATEGORIES_TOTAL: &str = "Total toutes catégories";
pub const LABEL_SIMULATION: &str = "Simulation";
pub const LABEL_REAL_NOMINAL: &str = "Données réelles nominales";
pub const LABEL_REAL_ADJUSTED: &str = "Données réelles (ajustées inflation)";
pub const LABEL_TOTAL_SIMULATED: &str = "Total Simulé";
pub const LABEL_TOTAL_REAL: &str = "Total Réel Nominal";
pub const LABEL_TOTAL_REAL_ADJUSTED: &str = "Total Réel (Ajusté Inflation)";
