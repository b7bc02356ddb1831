//! CLI output formatting utilities

use crate::models::MatchCandidate;

pub fn print_info(message: &str) {
    println!("ℹ️  {message}");
}

pub fn print_success(message: &str) {
    println!("✅ {message}");
}

pub fn print_warning(message: &str) {
    println!("⚠️  {message}");
}

pub fn print_error(message: &str) {
    eprintln!("❌ {message}");
}

/// Print ranked candidates with their verification badges.
pub fn print_candidates(candidates: &[MatchCandidate]) {
    if candidates.is_empty() {
        println!("No candidates cleared the similarity threshold.");
        return;
    }

    println!("Found {} candidates:", candidates.len());
    for (rank, candidate) in candidates.iter().enumerate() {
        let badge = match &candidate.verification {
            Some(v) => format!(
                "inliers: {} (ratio {:.2})",
                v.inliers, v.inlier_ratio
            ),
            None => "verification unavailable".to_string(),
        };
        println!(
            "  {}. catalog {} | score {:.4} | {}",
            rank + 1,
            candidate.pk_catalog_id,
            candidate.score,
            badge
        );
    }
}
