mod common;

mod tests {
    use embassy_time::Duration;
    use heapless::Vec;
    use ws2812_spi_fx::{
        EffectContext, EffectId, EffectQueue, EffectSlot, FadeInOutEffect, FireEffect,
        QueueFull, Rgb, Sequencer, SequencerConfig, StripDriver, effect::comet_pixel,
    };

    use super::common::{RecordingTransport, ScriptedRandom, decode_frames};

    type TestSequencer<'a, const N: usize> =
        Sequencer<'a, RecordingTransport, ScriptedRandom, N>;

    fn sequencer<'a, const N: usize>(config: SequencerConfig<8>) -> TestSequencer<'a, N> {
        Sequencer::new(
            StripDriver::from_transport(RecordingTransport::default()),
            EffectContext::new(ScriptedRandom::zeros()),
            config,
        )
    }

    fn short_fire(frames: u32) -> EffectSlot {
        EffectSlot::Fire(FireEffect::new(0, 0, Duration::from_millis(10)).with_frames(frames))
    }

    #[test]
    fn test_default_playlist_cycles_comets() {
        let mut sequencer = sequencer::<2>(SequencerConfig::default());

        for _ in 0..6 {
            assert_eq!(sequencer.tick().unwrap(), Duration::from_millis(5));
            assert_eq!(sequencer.current_id(), Some(EffectId::CometRacer));
        }
        // red finished, green starts
        sequencer.tick().unwrap();

        let frames = decode_frames(&sequencer.driver().encoder().transport().bytes, 2);
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0][0], comet_pixel(Rgb::new(1, 0, 0), 2, 0, 0));
        assert_eq!(frames[6][0], comet_pixel(Rgb::new(0, 1, 0), 2, 0, 0));
    }

    #[test]
    fn test_playlist_wraps_around() {
        let mut playlist = Vec::new();
        playlist.push(short_fire(1)).unwrap();
        playlist
            .push(EffectSlot::FadeInOut(FadeInOutEffect::new(Rgb::new(9, 9, 9))))
            .unwrap();
        let mut sequencer = sequencer::<3>(SequencerConfig::new(playlist));

        assert_eq!(sequencer.tick().unwrap(), Duration::from_millis(10));
        assert_eq!(sequencer.current_id(), Some(EffectId::Fire));
        for _ in 0..384 {
            sequencer.tick().unwrap();
            assert_eq!(sequencer.current_id(), Some(EffectId::FadeInOut));
        }
        sequencer.tick().unwrap();
        assert_eq!(sequencer.current_id(), Some(EffectId::Fire));
    }

    #[test]
    fn test_request_waits_for_effect_boundary() {
        let queue = EffectQueue::<4>::new();
        let mut sequencer = sequencer::<2>(SequencerConfig::default()).with_requests(&queue);

        sequencer.tick().unwrap();
        queue.requester().request(short_fire(2)).unwrap();

        // The running comet is not interrupted
        for _ in 0..5 {
            assert_eq!(sequencer.tick().unwrap(), Duration::from_millis(5));
            assert_eq!(sequencer.current_id(), Some(EffectId::CometRacer));
        }
        assert_eq!(queue.len(), 1);

        for _ in 0..2 {
            assert_eq!(sequencer.tick().unwrap(), Duration::from_millis(10));
            assert_eq!(sequencer.current_id(), Some(EffectId::Fire));
        }
        assert!(queue.is_empty());

        // Playlist resumes with the green comet
        sequencer.tick().unwrap();
        assert_eq!(sequencer.current_id(), Some(EffectId::CometRacer));
        let frames = decode_frames(&sequencer.driver().encoder().transport().bytes, 2);
        assert_eq!(frames[8][0], comet_pixel(Rgb::new(0, 1, 0), 2, 0, 0));
    }

    #[test]
    fn test_queue_full() {
        let queue = EffectQueue::<1>::new();
        queue.request(short_fire(1)).unwrap();
        assert_eq!(queue.request(short_fire(2)), Err(QueueFull(short_fire(2))));

        queue.clear();
        assert!(queue.next_request().is_none());
    }

    #[test]
    fn test_empty_playlist_renders_nothing() {
        let mut sequencer = sequencer::<4>(SequencerConfig::new(Vec::new()));
        assert_eq!(sequencer.tick().unwrap(), Duration::from_millis(0));
        assert_eq!(sequencer.current_id(), None);
        assert!(sequencer.driver().encoder().transport().bytes.is_empty());
    }

    #[test]
    fn test_empty_strip_does_not_spin() {
        let mut sequencer = sequencer::<0>(SequencerConfig::default());
        assert_eq!(sequencer.tick().unwrap(), Duration::from_millis(0));
        assert!(sequencer.driver().encoder().transport().bytes.is_empty());
    }
}
