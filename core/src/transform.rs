//! Backend → frontend record conversion.
//!
//! Each conversion destructures its source without `..`, so a field added to
//! the wire schema fails to compile until it is mapped here.

use crate::types::{
    Address, PostalAddress, Provider, Review, SearchFilters, SearchResponse,
};
use crate::wire::{AcAddress, AcProvider, AcReview, AcSearchFilters, AcSearchResponse};

impl From<AcAddress> for Address {
    fn from(address: AcAddress) -> Self {
        let AcAddress {
            street,
            city,
            state,
            zip,
        } = address;
        Address::Structured(PostalAddress {
            street,
            city,
            state,
            zip,
        })
    }
}

impl From<AcReview> for Review {
    fn from(review: AcReview) -> Self {
        let AcReview {
            id,
            patient_name,
            rating,
            date,
            comment,
            procedure,
        } = review;
        Review {
            id,
            patient_name,
            rating,
            date,
            comment,
            procedure,
        }
    }
}

impl From<AcProvider> for Provider {
    fn from(provider: AcProvider) -> Self {
        let AcProvider {
            id,
            name,
            facility_type,
            rating,
            review_count,
            price,
            original_price,
            distance_miles,
            address,
            neighborhood,
            availability_text,
            image_url,
            badges,
            accepts_insurance,
            insurance_partners,
            about,
            specialties,
            languages,
            accepted_insurance,
            images,
            reviews,
            available_time_slots,
            phone,
            website,
            parking_available,
            wheelchair_accessible,
            requires_referral,
            new_patient_accepted,
            negotiated_rate,
            standard_rate,
            savings,
            savings_percent,
            mario_points,
            mario_pick,
        } = provider;

        Provider {
            id,
            name,
            provider_type: facility_type,
            rating,
            review_count,
            price,
            original_price,
            distance: format_distance(distance_miles),
            address: address.into(),
            neighborhood,
            availability: availability_text,
            image_url,
            badges,
            accepts_insurance,
            insurance_partners,
            about,
            specialties,
            languages,
            insurance: accepted_insurance.clone(),
            accepted_insurance,
            images,
            reviews: reviews.map(|r| r.into_iter().map(Review::from).collect()),
            available_time_slots,
            phone,
            website,
            parking_available,
            wheelchair_accessible,
            requires_referral,
            new_patient_accepted,
            negotiated_rate,
            standard_rate,
            savings,
            savings_percent,
            mario_points,
            mario_pick,
        }
    }
}

impl From<AcSearchFilters> for SearchFilters {
    fn from(filters: AcSearchFilters) -> Self {
        let AcSearchFilters {
            price_range,
            locations,
            insurance_providers,
            specialties,
        } = filters;
        SearchFilters {
            price_range,
            locations,
            insurance_providers,
            specialties,
        }
    }
}

impl From<AcSearchResponse> for SearchResponse {
    fn from(response: AcSearchResponse) -> Self {
        let AcSearchResponse {
            providers,
            total_count,
            filters,
        } = response;
        SearchResponse {
            providers: providers.into_iter().map(Provider::from).collect(),
            total_count,
            filters: filters.into(),
        }
    }
}

/// `2.3` → `2.3 miles`, `4.0` → `4 miles`.
pub fn format_distance(miles: f64) -> String {
    format!("{miles} miles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageKind, ProviderImage, ProviderType, TimeSlot};

    fn full_record() -> AcProvider {
        AcProvider {
            id: "p-1".to_string(),
            name: "Lenox Hill Radiology".to_string(),
            facility_type: ProviderType::Hospital,
            rating: 4.9,
            review_count: 42,
            price: 650.0,
            original_price: Some(1200.0),
            distance_miles: 1.8,
            address: AcAddress {
                street: "61 E 77th Street".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                zip: "10075".to_string(),
            },
            neighborhood: "Upper East Side".to_string(),
            availability_text: "Next available: Today 2:30 PM".to_string(),
            image_url: Some("https://img.example/1.jpg".to_string()),
            badges: Some(vec!["Same Day Available".to_string()]),
            accepts_insurance: true,
            insurance_partners: Some(vec!["Cigna".to_string(), "Aetna".to_string()]),
            about: Some("Imaging specialists".to_string()),
            specialties: Some(vec!["Radiology".to_string()]),
            languages: Some(vec!["English".to_string(), "Spanish".to_string()]),
            accepted_insurance: Some(vec!["Cigna".to_string()]),
            images: Some(vec![ProviderImage {
                id: "img1".to_string(),
                url: "https://img.example/2.jpg".to_string(),
                alt: "Lobby".to_string(),
                kind: ImageKind::Facility,
            }]),
            reviews: Some(vec![AcReview {
                id: "rev1".to_string(),
                patient_name: "Sarah M.".to_string(),
                rating: 5.0,
                date: "2025-10-15".to_string(),
                comment: "Great".to_string(),
                procedure: Some("MRI Scan".to_string()),
            }]),
            available_time_slots: Some(vec![TimeSlot {
                id: "slot-1-0".to_string(),
                date: "2025-10-27".to_string(),
                time: "09:00 AM".to_string(),
                available: true,
            }]),
            phone: Some("(212) 555-0100".to_string()),
            website: Some("https://lenox.example".to_string()),
            parking_available: Some(false),
            wheelchair_accessible: Some(true),
            requires_referral: Some(true),
            new_patient_accepted: Some(true),
            negotiated_rate: Some(650.0),
            standard_rate: Some(1200.0),
            savings: Some(550.0),
            savings_percent: Some(46.0),
            mario_points: Some(120),
            mario_pick: Some(true),
        }
    }

    #[test]
    fn every_documented_field_maps() {
        let p = Provider::from(full_record());
        assert_eq!(p.id, "p-1");
        assert_eq!(p.name, "Lenox Hill Radiology");
        assert_eq!(p.provider_type, ProviderType::Hospital);
        assert_eq!(p.rating, 4.9);
        assert_eq!(p.review_count, 42);
        assert_eq!(p.price, 650.0);
        assert_eq!(p.original_price, Some(1200.0));
        assert_eq!(p.distance, "1.8 miles");
        assert_eq!(
            p.address,
            Address::Structured(PostalAddress {
                street: "61 E 77th Street".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                zip: "10075".to_string(),
            })
        );
        assert_eq!(p.neighborhood, "Upper East Side");
        assert_eq!(p.availability, "Next available: Today 2:30 PM");
        assert_eq!(p.image_url.as_deref(), Some("https://img.example/1.jpg"));
        assert_eq!(p.badges, Some(vec!["Same Day Available".to_string()]));
        assert!(p.accepts_insurance);
        assert_eq!(p.insurance_partners.as_ref().map(Vec::len), Some(2));
        assert_eq!(p.about.as_deref(), Some("Imaging specialists"));
        assert_eq!(p.specialties, Some(vec!["Radiology".to_string()]));
        assert_eq!(p.languages.as_ref().map(Vec::len), Some(2));
        assert_eq!(p.accepted_insurance, Some(vec!["Cigna".to_string()]));
        assert_eq!(p.images.as_ref().unwrap()[0].kind, ImageKind::Facility);
        let review = &p.reviews.as_ref().unwrap()[0];
        assert_eq!(review.patient_name, "Sarah M.");
        assert_eq!(review.procedure.as_deref(), Some("MRI Scan"));
        assert_eq!(p.available_time_slots.as_ref().unwrap()[0].time, "09:00 AM");
        assert_eq!(p.phone.as_deref(), Some("(212) 555-0100"));
        assert_eq!(p.website.as_deref(), Some("https://lenox.example"));
        assert_eq!(p.parking_available, Some(false));
        assert_eq!(p.wheelchair_accessible, Some(true));
        assert_eq!(p.requires_referral, Some(true));
        assert_eq!(p.new_patient_accepted, Some(true));
        assert_eq!(p.negotiated_rate, Some(650.0));
        assert_eq!(p.standard_rate, Some(1200.0));
        assert_eq!(p.savings, Some(550.0));
        assert_eq!(p.savings_percent, Some(46.0));
        assert_eq!(p.mario_points, Some(120));
        assert_eq!(p.mario_pick, Some(true));
    }

    #[test]
    fn insurance_alias_duplicates_accepted_insurance() {
        let p = Provider::from(full_record());
        assert_eq!(p.insurance, p.accepted_insurance);

        let mut bare = full_record();
        bare.accepted_insurance = None;
        assert_eq!(Provider::from(bare).insurance, None);
    }

    #[test]
    fn frontend_json_uses_camel_case_names() {
        let json = serde_json::to_value(Provider::from(full_record())).unwrap();
        assert_eq!(json["type"], "hospital");
        assert_eq!(json["reviewCount"], 42);
        assert_eq!(json["originalPrice"], 1200.0);
        assert_eq!(json["reviews"][0]["patientName"], "Sarah M.");
        assert_eq!(json["availableTimeSlots"][0]["id"], "slot-1-0");
        assert!(json.get("facility_type").is_none());
        assert!(json.get("review_count").is_none());
    }

    #[test]
    fn parses_backend_json_with_only_required_fields() {
        let raw = r#"{
            "id": "7",
            "name": "Manhattan Diagnostic Center",
            "facility_type": "imaging_center",
            "rating": 4.9,
            "review_count": 1089,
            "price": 595,
            "distance_miles": 1.2,
            "address": {"street": "133 E 58th Street", "city": "New York", "state": "NY", "zip": "10022"},
            "neighborhood": "Midtown East",
            "availability_text": "Next available: Today 4:00 PM",
            "accepts_insurance": true
        }"#;
        let ac: AcProvider = serde_json::from_str(raw).unwrap();
        let p = Provider::from(ac);
        assert_eq!(p.provider_type, ProviderType::ImagingCenter);
        assert_eq!(p.distance, "1.2 miles");
        assert!(p.reviews.is_none());
        assert!(p.original_price.is_none());
    }

    #[test]
    fn search_response_maps_counts_and_facets() {
        let ac = AcSearchResponse {
            providers: vec![full_record(), full_record()],
            total_count: 2,
            filters: AcSearchFilters {
                price_range: (200.0, 2000.0),
                locations: vec!["Chelsea".to_string()],
                insurance_providers: vec!["Aetna".to_string()],
                specialties: vec!["Cardiology".to_string()],
            },
        };
        let resp = SearchResponse::from(ac);
        assert_eq!(resp.providers.len(), 2);
        assert_eq!(resp.total_count, 2);
        assert_eq!(resp.filters.price_range, (200.0, 2000.0));
        assert_eq!(resp.filters.insurance_providers, vec!["Aetna".to_string()]);
    }

    #[test]
    fn whole_mile_distances_drop_the_fraction() {
        assert_eq!(format_distance(4.0), "4 miles");
        assert_eq!(format_distance(0.9), "0.9 miles");
    }
}
