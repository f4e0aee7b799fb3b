//! Result summaries.

use console::style;

use crate::api::Meta;
use crate::media::MediaUploadResponse;

/// Print the outcome of a media upload.
pub fn print_upload_summary(response: &MediaUploadResponse, total_bytes: usize, chunks: usize) {
    println!();
    println!("{}", style("Upload complete:").bold());
    println!("  Media id: {}", style(&response.media_id_string).green());
    println!("  Size:     {} bytes in {} chunk(s)", total_bytes, chunks);
    println!("  Expires:  in {} seconds", response.expires_after_secs);
    if let Some(info) = &response.processing_info {
        println!("  Processing: {}", style(&info.state).yellow());
        if let Some(after) = info.check_after_secs {
            println!("  Check again after {} seconds", after);
        }
    }
}

/// Print the page metadata of a listing.
pub fn print_page_summary(meta: Option<&Meta>) {
    let Some(meta) = meta else {
        return;
    };

    println!();
    println!("  Results: {}", meta.result_count.unwrap_or(0));
    if let Some(next) = &meta.next_token {
        println!("  Next page: {}", style(next).dim());
    }
}
