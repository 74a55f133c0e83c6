/// Lower confidence bound `mu - kappa * sigma` at a point with predicted
/// mean `mu` and standard deviation `sigma`, `kappa >= 0` trading off
/// exploitation against exploration.
pub fn lcb(mu: f64, sigma: f64, kappa: f64) -> f64 {
    mu - kappa * sigma
}
