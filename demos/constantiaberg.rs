use saeon_obs::{ObservationClient, ObservationsError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), ObservationsError> {
    configure_polars_display();
    // Reads the API key from OBSDB_KEY
    let client = ObservationClient::from_env()?;

    let datasets = client.list_datasets().call().await?;
    println!("{} datasets available", datasets.len());

    let selection = datasets.filter(|dataset| {
        dataset.site_name.as_deref() == Some("Constantiaberg")
            && dataset.description() == "Air Temperature - Daily Minimum - Degrees Celsius"
    });
    println!("{}", selection.to_dataframe()?);

    let observations = client
        .fetch_observations(&selection)
        .start_date("2020-12-01")
        .end_date("2020-12-07")
        .call()
        .await?;

    println!("{}", observations.to_dataframe()?);

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
