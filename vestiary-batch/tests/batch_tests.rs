use std::io::Cursor;
use std::sync::{Arc, Mutex};
use vestiary_batch::{
    DEFAULT_INSTRUCTION, DescriptionRequester, ProgressEvent, ProgressSink, group_images,
};
use vestiary_core::UploadedImage;
use vestiary_model::MockService;

fn png_upload(filename: &str, group_id: &str) -> UploadedImage {
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        2,
        2,
        image::Rgb([120, 90, 60]),
    ))
    .write_to(&mut out, image::ImageFormat::Png)
    .unwrap();
    UploadedImage::new(filename, out.into_inner()).with_group(group_id)
}

// Records every event for later assertions.
struct CollectingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingSink {
    fn new() -> Self {
        Self { events: Mutex::new(Vec::new()) }
    }

    fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for CollectingSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[tokio::test]
async fn duplicate_identifiers_yield_one_result_per_group() {
    let mock = Arc::new(
        MockService::new("mock")
            .with_description("A red cotton shirt.")
            .with_description("Black denim pants."),
    );
    let requester = DescriptionRequester::new(mock.clone());

    let results = requester
        .run_batch(vec![
            png_upload("front.jpg", "shirt1"),
            png_upload("back.jpg", "shirt1"),
            png_upload("full.jpg", "pants1"),
        ])
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].group_id, "shirt1");
    assert_eq!(results[0].outcome.text(), "A red cotton shirt.");
    assert_eq!(results[1].group_id, "pants1");
    assert_eq!(results[1].outcome.text(), "Black denim pants.");

    // One request per group, and the shirt1 request carried both images.
    assert_eq!(mock.call_count(), 2);
    let requests = mock.requests();
    assert_eq!(requests[0].images.len(), 2);
    assert_eq!(requests[1].images.len(), 1);
    assert_eq!(requests[0].instruction, DEFAULT_INSTRUCTION);
    assert!(requests[0].system.is_some());
}

#[tokio::test]
async fn service_failure_becomes_a_failed_result() {
    let mock = Arc::new(MockService::new("mock").with_error("request timed out after 60s"));
    let requester = DescriptionRequester::new(mock);

    let results = requester.run_batch(vec![png_upload("dress.jpg", "dress1")]).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].outcome.is_failed());
    assert!(!results[0].outcome.text().is_empty());
    assert!(results[0].outcome.text().contains("timed out"));
}

#[tokio::test]
async fn empty_batch_makes_no_service_calls() {
    let mock = Arc::new(MockService::new("mock"));
    let requester = DescriptionRequester::new(mock.clone());
    let sink = CollectingSink::new();

    let results = requester.run_batch_with_progress(Vec::new(), &sink).await;

    assert!(results.is_empty());
    assert_eq!(mock.call_count(), 0);

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], ProgressEvent::BatchStarted { total_groups: 0 }));
    assert!(matches!(events[1], ProgressEvent::BatchFinished { described: 0, failed: 0 }));
}

#[tokio::test]
async fn one_failing_group_never_halts_the_batch() {
    let mock = Arc::new(
        MockService::new("mock")
            .with_description("A wool coat.")
            .with_error("quota exhausted")
            .with_description("Leather boots."),
    );
    let requester = DescriptionRequester::new(mock);

    let results = requester
        .run_batch(vec![
            png_upload("a.jpg", "coat1"),
            png_upload("b.jpg", "hat1"),
            png_upload("c.jpg", "boots1"),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert!(!results[0].outcome.is_failed());
    assert!(results[1].outcome.is_failed());
    assert!(!results[2].outcome.is_failed());
    assert_eq!(results[2].outcome.text(), "Leather boots.");
}

#[tokio::test]
async fn undecodable_upload_fails_without_a_service_call() {
    let mock = Arc::new(MockService::new("mock"));
    let requester = DescriptionRequester::new(mock.clone());

    let garbage = UploadedImage::new("broken.jpg", b"definitely not an image".to_vec());
    let results = requester.run_batch(vec![garbage]).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].outcome.is_failed());
    assert!(results[0].outcome.text().contains("Encoding error"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn progress_reports_fractions_in_order() {
    let mock = Arc::new(MockService::new("mock"));
    let requester = DescriptionRequester::new(mock);
    let sink = CollectingSink::new();

    requester
        .run_batch_with_progress(
            vec![
                png_upload("a.jpg", "g1"),
                png_upload("b.jpg", "g2"),
                png_upload("c.jpg", "g3"),
            ],
            &sink,
        )
        .await;

    let fractions: Vec<f64> =
        sink.events().iter().filter_map(|e| e.fraction_complete()).collect();
    assert_eq!(fractions, vec![1.0 / 3.0, 2.0 / 3.0, 1.0]);

    let events = sink.events();
    assert!(matches!(events.first(), Some(ProgressEvent::BatchStarted { total_groups: 3 })));
    assert!(matches!(events.last(), Some(ProgressEvent::BatchFinished { described: 3, failed: 0 })));
}

#[tokio::test]
async fn result_count_matches_distinct_identifiers() {
    let uploads = vec![
        png_upload("a.jpg", "x"),
        png_upload("b.jpg", ""),
        png_upload("c.jpg", "x"),
        png_upload("d.jpg", "y"),
        png_upload("e.jpg", ""),
    ];
    let distinct = group_images(uploads.clone()).len();

    let mock = Arc::new(MockService::new("mock"));
    let requester = DescriptionRequester::new(mock.clone());
    let results = requester.run_batch(uploads).await;

    assert_eq!(results.len(), distinct);
    assert_eq!(mock.call_count(), distinct);
    let ids: Vec<&str> = results.iter().map(|r| r.group_id.as_str()).collect();
    assert_eq!(ids, ["x", "", "y"]);
}
