use crate::error::ExtractError;

/// Parse a page spec like "1,3,5" or "1-3,5" into zero-based page indices.
///
/// Pages in the spec are 1-based; ranges are inclusive on both ends. The
/// output preserves the order pages were listed in, including repeats, so
/// "3,1,3" on a 5-page document yields `[2, 0, 2]`. Any malformed or
/// out-of-range token fails the whole parse; no partial output is returned.
pub fn parse_page_spec(spec: &str, total_pages: u32) -> Result<Vec<u32>, ExtractError> {
    if spec.trim().is_empty() {
        return Err(ExtractError::EmptySpec);
    }

    let mut indices = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            let start: u32 = start
                .trim()
                .parse()
                .map_err(|_| ExtractError::InvalidRange(part.to_string()))?;
            let end: u32 = end
                .trim()
                .parse()
                .map_err(|_| ExtractError::InvalidRange(part.to_string()))?;

            if start < 1 || end > total_pages || start > end {
                return Err(ExtractError::InvalidRange(part.to_string()));
            }

            indices.extend((start..=end).map(|page| page - 1));
        } else {
            let page: u32 = part
                .parse()
                .map_err(|_| ExtractError::InvalidPage(part.to_string()))?;

            if page < 1 || page > total_pages {
                return Err(ExtractError::InvalidPage(part.to_string()));
            }

            indices.push(page - 1);
        }
    }

    Ok(indices)
}
