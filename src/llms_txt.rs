// LLM-friendly documentation endpoint content.

pub const LLMS_TXT: &str = r#"# Timerunner Guide API
> Backend for an event guide: keyword-tuned page copy and the Bronze reward calculator.

## API Base URL
/api/

## Authentication
None. All endpoints are read-only or pure computations.

## Key Endpoints
- GET /api/rewards - Filter rewards (query: type, q, bronze_only, page, per_page)
- GET /api/rewards/types - Reward types present in the catalog
- GET /api/rewards/{id} - One reward with its detail labels
- POST /api/calculator/tally - Total the Bronze cost of selected reward ids; other currencies appear only in byCurrency
- GET /api/seo/pages - Configured guide pages
- GET /api/seo/pages/{slug} - Generated copy for a guide page
- POST /api/seo/paragraphs - Generate keyword-tuned paragraphs
- GET /metrics - Prometheus metrics
- GET /health - Liveness

## Reward Filtering
- type: "all" or one of mount, pet, toy, transmog, ensemble, arsenal, illusion, title, heirloom, decor, other
- q: case-insensitive text matched against names, sources, requirements, achievements, table labels and metadata
- bronze_only: only rewards that cost Bronze
At most 60 rewards are displayed per query; displayedCostSum covers the displayed rewards.

## Paragraph Generation
Body: {"keyword": "...", "topics": [...], "supportingConcepts": [...],
       "options": {"minWords": 820, "targetDensity": 0.03, "minParagraphKeywordOccurrences": 3}}
Keyword density is kept between 3% and 5% when achievable.
"#;
