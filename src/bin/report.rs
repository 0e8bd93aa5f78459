//! Full pipeline run: ingest the three zone exports, align and aggregate,
//! evaluate the forecasting baselines over the daytime window, and render
//! the overview and forecast charts.

use zonecast::align::{outer_align, resample_hourly, spatial_mean};
use zonecast::config::PipelineConfig;
use zonecast::eval::{daytime_window, evaluate, print_score_table, SeriesEvaluation};
use zonecast::ingest::{print_summary, read_zone_series};
use zonecast::plot::{forecast_chart, zone_grid};
use zonecast::Result;

fn main() -> Result<()> {
    env_logger::init();

    let config = PipelineConfig::default();

    let mut zone_series = Vec::with_capacity(config.zones.len());
    for zone in &config.zones {
        let series = read_zone_series(zone)?;
        print_summary(&zone.name, &series);
        zone_series.push(series);
    }

    let aligned = outer_align(&zone_series)?;

    // Hourly means smooth the per-zone cadences for the overview chart.
    let hourly = resample_hourly(&aligned)?;
    let grid_path = config.output_dir.join("zones_overview.png");
    zone_grid(&grid_path, &hourly, &config.zones)?;

    // Evaluation runs on the raw-cadence aligned frame so the daytime window
    // holds enough observations for the lag fit and the held-out block.
    let targets = [
        ("Solar", "Solar_interp", "W/m^2", "solar_forecast.png"),
        ("Wind", "Wind_interp", "m/s", "wind_forecast.png"),
    ];

    let mut evaluations: Vec<SeriesEvaluation> = Vec::new();
    for (prefix, label, unit, file) in targets {
        let regional = spatial_mean(&aligned, prefix, label)?;
        let window = daytime_window(
            &regional,
            config.eval.day,
            config.eval.start_hour,
            config.eval.end_hour,
        );

        let evaluation = evaluate(&window, label, &config.eval)?;

        let chart_path = config.output_dir.join(file);
        forecast_chart(
            &chart_path,
            &format!("{} Regional Mean Forecast ({})", prefix, config.eval.day),
            unit,
            &evaluation.timestamps,
            &evaluation.actual,
            &evaluation.autoregressive,
            &format!("AR({})", evaluation.lags),
            &evaluation.persistence,
        )?;

        evaluations.push(evaluation);
    }

    print_score_table(&evaluations, &config.eval);

    Ok(())
}
