//! Post-hoc KPI computation from simulation records.

use std::fmt;

use super::types::StepRecord;

/// Aggregate key performance indicators derived from a complete simulation run.
///
/// Computed post-hoc from `&[StepRecord]` so the report always agrees with the
/// step data it summarizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiReport {
    /// Total resort demand energy (kWh).
    pub demand_kwh: f64,
    /// Energy served by hydro (kWh).
    pub hydro_kwh: f64,
    /// Energy served by battery discharge (kWh).
    pub battery_discharge_kwh: f64,
    /// Energy drawn into the battery from hydro surplus (kWh).
    pub battery_charge_kwh: f64,
    /// Energy served by the generator (kWh).
    pub generator_kwh: f64,
    /// Available hydro energy neither consumed nor stored (kWh).
    pub spilled_kwh: f64,
    /// Demand energy no source could meet (kWh).
    pub unserved_kwh: f64,
    /// Share of demand energy met by hydro (percent).
    pub hydro_share_pct: f64,
    /// Generator fuel cost over the run (currency units).
    pub fuel_cost: f64,
    /// Highest single-step demand (kW).
    pub peak_demand_kw: f64,
    /// Number of steps with any unserved demand.
    pub unserved_steps: usize,
    /// Lowest post-step battery SoC (0.0 to 1.0).
    pub min_battery_soc: f64,
    /// Lowest post-step reservoir volume (m³).
    pub min_reservoir_m3: f64,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record slice.
    ///
    /// # Arguments
    ///
    /// * `records` - Complete simulation step records
    /// * `dt_hours` - Timestep duration in hours
    /// * `fuel_cost_per_kwh` - Generator fuel price
    ///
    /// # Returns
    ///
    /// A `KpiReport` with all fields populated, or all zeros for an empty run.
    pub fn from_records(records: &[StepRecord], dt_hours: f64, fuel_cost_per_kwh: f64) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut kpi = Self {
            min_battery_soc: f64::INFINITY,
            min_reservoir_m3: f64::INFINITY,
            ..Self::default()
        };

        for r in records {
            let d = r.dispatch();
            kpi.demand_kwh += r.demand_kw * dt_hours;
            kpi.hydro_kwh += d.hydro_kw * dt_hours;
            kpi.battery_discharge_kwh += d.discharge_kw() * dt_hours;
            kpi.battery_charge_kwh += d.charge_kw() * dt_hours;
            kpi.generator_kwh += d.generator_kw * dt_hours;
            kpi.spilled_kwh += d.spilled_kw * dt_hours;
            kpi.unserved_kwh += d.unserved_kw * dt_hours;

            kpi.peak_demand_kw = kpi.peak_demand_kw.max(r.demand_kw);
            kpi.min_battery_soc = kpi.min_battery_soc.min(r.battery_soc);
            kpi.min_reservoir_m3 = kpi.min_reservoir_m3.min(r.reservoir_level_m3);

            if d.unserved_kw > 0.0 {
                kpi.unserved_steps += 1;
            }
        }

        kpi.hydro_share_pct = if kpi.demand_kwh > 0.0 {
            100.0 * kpi.hydro_kwh / kpi.demand_kwh
        } else {
            0.0
        };
        kpi.fuel_cost = kpi.generator_kwh * fuel_cost_per_kwh;
        kpi
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Demand energy:         {:.2} kWh", self.demand_kwh)?;
        writeln!(f, "Hydro energy:          {:.2} kWh", self.hydro_kwh)?;
        writeln!(f, "Battery discharge:     {:.2} kWh", self.battery_discharge_kwh)?;
        writeln!(f, "Battery charge:        {:.2} kWh", self.battery_charge_kwh)?;
        writeln!(f, "Generator energy:      {:.2} kWh", self.generator_kwh)?;
        writeln!(f, "Spilled energy:        {:.2} kWh", self.spilled_kwh)?;
        writeln!(f, "Unserved energy:       {:.2} kWh", self.unserved_kwh)?;
        writeln!(f, "Hydro share:           {:.1}%", self.hydro_share_pct)?;
        writeln!(f, "Fuel cost:             {:.2}", self.fuel_cost)?;
        writeln!(f, "Peak demand:           {:.2} kW", self.peak_demand_kw)?;
        writeln!(f, "Unserved steps:        {}", self.unserved_steps)?;
        writeln!(f, "Min battery SoC:       {:.1}%", self.min_battery_soc * 100.0)?;
        write!(f, "Min reservoir level:   {:.0} m³", self.min_reservoir_m3)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;
    use crate::sim::types::ResortSnapshot;

    fn make_record(demand_kw: f64, hydro_kw: f64, battery_kw: f64, generator_kw: f64) -> StepRecord {
        let served = hydro_kw + battery_kw.max(0.0) + generator_kw;
        StepRecord {
            step: 0,
            time: Local::now(),
            demand_kw,
            available_hydro_kw: hydro_kw + (-battery_kw).max(0.0),
            hydro_kw,
            battery_kw,
            generator_kw,
            spilled_kw: 0.0,
            unserved_kw: (demand_kw - served).max(0.0),
            battery_soc: 0.5,
            reservoir_level_m3: 50_000.0,
            resort: ResortSnapshot::default(),
        }
    }

    #[test]
    fn energy_totals() {
        // dt = 0.5 h
        let records = vec![
            make_record(10.0, 10.0, -4.0, 0.0),
            make_record(20.0, 6.0, 8.0, 6.0),
        ];
        let kpi = KpiReport::from_records(&records, 0.5, 0.2);
        assert!((kpi.demand_kwh - 15.0).abs() < 1e-9);
        assert!((kpi.hydro_kwh - 8.0).abs() < 1e-9);
        assert!((kpi.battery_discharge_kwh - 4.0).abs() < 1e-9);
        assert!((kpi.battery_charge_kwh - 2.0).abs() < 1e-9);
        assert!((kpi.generator_kwh - 3.0).abs() < 1e-9);
        assert!((kpi.fuel_cost - 0.6).abs() < 1e-9);
        assert_eq!(kpi.unserved_kwh, 0.0);
    }

    #[test]
    fn hydro_share_of_demand() {
        let records = vec![make_record(10.0, 5.0, 0.0, 5.0), make_record(10.0, 10.0, 0.0, 0.0)];
        let kpi = KpiReport::from_records(&records, 1.0, 0.2);
        assert!((kpi.hydro_share_pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn unserved_step_counting() {
        let records = vec![
            make_record(10.0, 10.0, 0.0, 0.0),
            make_record(30.0, 10.0, 0.0, 15.0),
            make_record(12.0, 2.0, 0.0, 0.0),
        ];
        let kpi = KpiReport::from_records(&records, 1.0, 0.2);
        assert_eq!(kpi.unserved_steps, 2);
        assert!((kpi.unserved_kwh - 15.0).abs() < 1e-9);
        assert_eq!(kpi.peak_demand_kw, 30.0);
    }

    #[test]
    fn minimum_levels() {
        let mut records = vec![make_record(1.0, 1.0, 0.0, 0.0); 3];
        records[1].battery_soc = 0.2;
        records[2].reservoir_level_m3 = 7_500.0;
        let kpi = KpiReport::from_records(&records, 1.0, 0.2);
        assert_eq!(kpi.min_battery_soc, 0.2);
        assert_eq!(kpi.min_reservoir_m3, 7_500.0);
    }

    #[test]
    fn empty_records() {
        let kpi = KpiReport::from_records(&[], 0.25, 0.2);
        assert_eq!(kpi, KpiReport::default());
        assert_eq!(kpi.min_battery_soc, 0.0);
        assert_eq!(kpi.unserved_steps, 0);
    }

    #[test]
    fn display_lines_are_labelled() {
        let kpi = KpiReport::from_records(&[make_record(10.0, 10.0, 0.0, 0.0)], 1.0, 0.2);
        let text = kpi.to_string();
        assert!(text.contains("Hydro share:           100.0%"));
        assert!(text.contains("Unserved steps:        0"));
        assert_eq!(text.lines().count(), 14);
    }
}
