mod common;

mod tests {
    use embassy_time::Duration;
    use ws2812_spi_fx::{
        CometRacerEffect, Effect, EffectContext, Rgb, StripDriver, effect::comet_pixel,
        run_to_completion,
    };

    use super::common::{RecordingDelay, RecordingTransport, ScriptedRandom, decode_frames};

    const RED_UNIT: Rgb = Rgb { r: 1, g: 0, b: 0 };

    #[test]
    fn test_comet_pixel_head_and_tail() {
        assert_eq!(comet_pixel(RED_UNIT, 60, 0, 0), Rgb::new(240, 0, 0));
        assert_eq!(comet_pixel(RED_UNIT, 60, 10, 10), Rgb::new(240, 0, 0));
        assert_eq!(comet_pixel(RED_UNIT, 60, 10, 9), Rgb::new(236, 0, 0));
        assert_eq!(comet_pixel(RED_UNIT, 60, 10, 0), Rgb::new(200, 0, 0));
    }

    #[test]
    fn test_comet_pixel_ahead_of_head_is_dark() {
        assert_eq!(comet_pixel(RED_UNIT, 60, 0, 1), Rgb::new(0, 0, 0));
        assert_eq!(comet_pixel(RED_UNIT, 60, 5, 59), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_comet_pixel_tail_clamps_at_zero() {
        assert_eq!(comet_pixel(RED_UNIT, 60, 100, 0), Rgb::new(0, 0, 0));
        assert_eq!(comet_pixel(RED_UNIT, 60, 100, 40), Rgb::new(0, 0, 0));
        assert_eq!(comet_pixel(RED_UNIT, 60, 100, 41), Rgb::new(4, 0, 0));
    }

    #[test]
    fn test_comet_pixel_saturates() {
        assert_eq!(comet_pixel(Rgb::new(2, 1, 0), 60, 0, 0), Rgb::new(255, 240, 0));
    }

    #[test]
    fn test_comet_renders_three_strip_lengths() {
        let mut ctx = EffectContext::<4, _>::new(ScriptedRandom::zeros());
        let mut driver = StripDriver::from_transport(RecordingTransport::default());
        let mut delay = RecordingDelay::default();
        let mut effect = CometRacerEffect::new(Rgb::new(0, 1, 0));

        run_to_completion(&mut effect, &mut ctx, &mut driver, &mut delay).unwrap();

        assert_eq!(delay.delays_ms, [5; 12]);
        let frames = decode_frames(&driver.encoder().transport().bytes, 4);
        assert_eq!(frames.len(), 12);
        for (length, frame) in frames.iter().enumerate() {
            for (index, &pixel) in frame.iter().enumerate() {
                assert_eq!(pixel, comet_pixel(Rgb::new(0, 1, 0), 4, length, index));
            }
        }
        assert_eq!(frames[0][0], Rgb::new(0, 16, 0));
        assert!(frames[11].iter().all(|&pixel| pixel == Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_comet_leaves_framebuffer_alone() {
        let mut ctx = EffectContext::<3, _>::new(ScriptedRandom::zeros());
        ctx.frame.set_all(7, 8, 9);
        let mut driver = StripDriver::from_transport(RecordingTransport::default());
        let mut effect =
            CometRacerEffect::new(RED_UNIT).with_frame_delay(Duration::from_millis(1));

        while effect.step(&mut ctx, &mut driver).unwrap().is_some() {}

        assert!(ctx.frame.iter().all(|pixel| pixel == Rgb::new(7, 8, 9)));
    }
}
