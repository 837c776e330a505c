use contracts::domain::a001_laboratory::aggregate::Laboratory;
use contracts::shared::search::{query_len, GlobalSearchResponse, SearchHit, MAX_HITS_PER_GROUP, MIN_QUERY_LEN};

use crate::domain::{a001_laboratory, a002_product, a003_batch};
use crate::shared::error::ApiResult;

pub fn laboratory_hit(lab: &Laboratory) -> SearchHit {
    SearchHit {
        id: lab.id,
        title: lab.name.clone(),
        subtitle: lab.address.clone().unwrap_or_default(),
        extra: lab.phone.clone().filter(|p| !p.is_empty()),
    }
}

/// Up to `MAX_HITS_PER_GROUP` products, batches and laboratories matching `q`.
/// Queries shorter than `MIN_QUERY_LEN` return empty groups without touching the database.
pub async fn global_search(q: &str) -> ApiResult<GlobalSearchResponse> {
    if query_len(q) < MIN_QUERY_LEN {
        return Ok(GlobalSearchResponse::default());
    }
    let term = q.trim();
    let limit = MAX_HITS_PER_GROUP as u64;

    let products =
        a002_product::service::decorate(a002_product::repository::search(term, limit).await?)
            .await?;
    let batches =
        a003_batch::service::decorate(a003_batch::repository::search(term, limit).await?).await?;
    let labs = a001_laboratory::repository::search(term, limit).await?;

    let response = GlobalSearchResponse {
        products: products
            .iter()
            .map(|p| SearchHit {
                id: p.id,
                title: p.name.clone(),
                subtitle: format!("SKU: {}", p.serial_code),
                extra: Some(p.laboratory_name.clone()).filter(|l| !l.is_empty()),
            })
            .collect(),
        batches: batches
            .iter()
            .map(|b| SearchHit {
                id: b.id,
                title: b.lot_code.clone(),
                subtitle: b.product_name.clone(),
                extra: Some(format!("Vence: {}", b.expires_on.format("%d-%m-%Y"))),
            })
            .collect(),
        laboratories: labs.iter().map(laboratory_hit).collect(),
    };

    tracing::debug!(
        "Global search '{}': {} products, {} batches, {} laboratories",
        term,
        response.products.len(),
        response.batches.len(),
        response.laboratories.len()
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_short_query_returns_empty_groups() {
        let response = global_search(" pa ").await.unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_laboratory_hit_fields() {
        let lab = Laboratory {
            id: 2,
            name: "Saval".into(),
            address: None,
            phone: Some(String::new()),
        };
        let hit = laboratory_hit(&lab);
        assert_eq!(hit.title, "Saval");
        assert_eq!(hit.subtitle, "");
        assert_eq!(hit.extra, None);
    }
}
