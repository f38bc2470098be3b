use clap::{Args, Subcommand};
use tnf_core::enums::Status;
use tnf_core::record::RecordId;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch every detection and print the filtered list.
    Rows(FilterArgs),
    /// Fetch every detection and print status counts for the filtered list.
    Stats(FilterArgs),
    /// Print the detail panel for one detection.
    Show(ShowArgs),
    /// Set the status of one detection, then reload.
    SetStatus(SetStatusArgs),
}

/// Filter inputs. An empty string leaves that filter unset.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Only this status: pending, reviewed, ignored, fixed
    #[arg(long)]
    pub status: Option<String>,
    /// Hide detections below this confidence (0..=1)
    #[arg(long)]
    pub min_confidence: Option<f64>,
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Detection id
    pub id: RecordId,
    /// Include the image reference in the output
    #[arg(long)]
    pub with_image: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SetStatusArgs {
    /// Detection id
    pub id: RecordId,
    /// New status: pending, reviewed, ignored, fixed
    pub status: Status,
}
