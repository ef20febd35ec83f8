//! Canned EONET v3 payloads shaped like the real API's responses.

use serde_json::{json, Value};

/// A small `/events` response: one closed wildfire and one open storm.
pub fn events_payload() -> Value {
    json!({
        "title": "EONET Events",
        "description": "Natural events from EONET.",
        "link": "https://eonet.gsfc.nasa.gov/api/v3/events",
        "events": [
            {
                "id": "EONET_6500",
                "title": "Creek Fire, Fresno, California",
                "description": null,
                "link": "https://eonet.gsfc.nasa.gov/api/v3/events/EONET_6500",
                "closed": "2024-02-10T00:00:00Z",
                "categories": [{ "id": "wildfires", "title": "Wildfires" }],
                "sources": [{ "id": "InciWeb", "url": "https://inciweb.nwcg.gov/incident/7147/" }],
                "geometry": [{
                    "magnitudeValue": 380000.0,
                    "magnitudeUnit": "acres",
                    "date": "2024-01-05T00:00:00Z",
                    "type": "Point",
                    "coordinates": [-119.26, 37.19]
                }]
            },
            {
                "id": "EONET_6501",
                "title": "Tropical Storm Alpha",
                "description": null,
                "link": "https://eonet.gsfc.nasa.gov/api/v3/events/EONET_6501",
                "closed": null,
                "categories": [{ "id": "severeStorms", "title": "Severe Storms" }],
                "sources": [{ "id": "JTWC", "url": "https://www.metoc.navy.mil/jtwc/" }],
                "geometry": [{
                    "magnitudeValue": 35.0,
                    "magnitudeUnit": "kts",
                    "date": "2024-01-06T06:00:00Z",
                    "type": "Point",
                    "coordinates": [10.0, 20.0]
                }]
            }
        ]
    })
}

/// A trimmed `/categories` response.
pub fn categories_payload() -> Value {
    json!({
        "title": "EONET Event Categories",
        "categories": [
            { "id": "wildfires", "title": "Wildfires" },
            { "id": "volcanoes", "title": "Volcanoes" },
            { "id": "severeStorms", "title": "Severe Storms" }
        ]
    })
}

/// A trimmed `/sources` response.
pub fn sources_payload() -> Value {
    json!({
        "title": "EONET Event Sources",
        "sources": [
            { "id": "InciWeb", "title": "InciWeb", "source": "https://inciweb.nwcg.gov/" },
            { "id": "SIVolcano", "title": "Smithsonian Institution Global Volcanism Program", "source": "https://volcano.si.edu/" }
        ]
    })
}
