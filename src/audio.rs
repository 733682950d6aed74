use crate::constants::FFT_SIZE;
use web_sys as web;

/// Analyser graph bound to one media element for its whole life:
/// element → MediaElementSource → Analyser → Gain → destination.
pub struct AudioPipeline {
    element: web::HtmlAudioElement,
    _source: web::MediaElementAudioSourceNode,
    analyser: web::AnalyserNode,
    output: web::GainNode,
    bins: Vec<u8>,
}

impl AudioPipeline {
    fn new(ctx: &web::AudioContext, src: &str, muted: bool) -> anyhow::Result<Self> {
        let element = web::HtmlAudioElement::new_with_src(src)
            .map_err(|e| anyhow::anyhow!("audio element for {}: {:?}", src, e))?;
        element.set_cross_origin(Some("anonymous"));
        let source = ctx
            .create_media_element_source(&element)
            .map_err(|e| anyhow::anyhow!("MediaElementSource error: {:?}", e))?;
        let analyser = web::AnalyserNode::new(ctx)
            .map_err(|e| anyhow::anyhow!("AnalyserNode error: {:?}", e))?;
        analyser.set_fft_size(FFT_SIZE);
        let output =
            web::GainNode::new(ctx).map_err(|e| anyhow::anyhow!("GainNode error: {:?}", e))?;
        output.gain().set_value(if muted { 0.0 } else { 1.0 });

        _ = source.connect_with_audio_node(&analyser);
        _ = analyser.connect_with_audio_node(&output);
        _ = output.connect_with_audio_node(&ctx.destination());

        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        Ok(Self {
            element,
            _source: source,
            analyser,
            output,
            bins,
        })
    }

    fn refresh(&mut self) -> &[u8] {
        self.analyser.get_byte_frequency_data(&mut self.bins);
        &self.bins
    }

    fn teardown(&self) {
        _ = self.element.pause();
        _ = self.output.disconnect();
    }
}

/// Owns the `AudioContext`, the current track pipeline and the ambience loop.
pub struct AudioHost {
    ctx: web::AudioContext,
    track: Option<(String, AudioPipeline)>,
    ambience: web::HtmlAudioElement,
    muted: bool,
}

impl AudioHost {
    pub fn new(ambience_src: &str) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ambience = web::HtmlAudioElement::new_with_src(ambience_src)
            .map_err(|e| anyhow::anyhow!("ambience element: {:?}", e))?;
        ambience.set_loop(true);
        ambience.set_volume(0.0);
        Ok(Self {
            ctx,
            track: None,
            ambience,
            muted: false,
        })
    }

    /// Bind the analyser to `src`, rebuilding the graph when the source changes.
    fn load(&mut self, src: &str) -> anyhow::Result<&mut AudioPipeline> {
        let stale = !matches!(&self.track, Some((bound, _)) if bound == src);
        if stale {
            if let Some((old, pipeline)) = self.track.take() {
                log::info!("[audio] unbinding {}", old);
                pipeline.teardown();
            }
            let pipeline = AudioPipeline::new(&self.ctx, src, self.muted)?;
            log::info!("[audio] bound analyser to {}", src);
            self.track = Some((src.to_string(), pipeline));
        }
        match &mut self.track {
            Some((_, pipeline)) => Ok(pipeline),
            None => Err(anyhow::anyhow!("no pipeline for {}", src)),
        }
    }

    /// Start (or continue) `src`. The returned promise rejects when autoplay is blocked.
    pub fn play(&mut self, src: &str, restart: bool) -> anyhow::Result<js_sys::Promise> {
        _ = self.ctx.resume();
        let pipeline = self.load(src)?;
        if restart {
            pipeline.element.set_current_time(0.0);
        }
        pipeline
            .element
            .play()
            .map_err(|e| anyhow::anyhow!("play {}: {:?}", src, e))
    }

    pub fn pause(&self) {
        if let Some((_, pipeline)) = &self.track {
            _ = pipeline.element.pause();
        }
    }

    /// Latest spectrum, while a track is actually playing.
    pub fn refresh(&mut self) -> Option<&[u8]> {
        match &mut self.track {
            Some((_, pipeline)) if !pipeline.element.paused() => Some(pipeline.refresh()),
            _ => None,
        }
    }

    pub fn playback_time(&self) -> Option<f32> {
        match &self.track {
            Some((_, pipeline)) if !pipeline.element.paused() => {
                Some(pipeline.element.current_time() as f32)
            }
            _ => None,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some((_, pipeline)) = &self.track {
            pipeline.output.gain().set_value(if muted { 0.0 } else { 1.0 });
        }
    }

    pub fn set_ambience_volume(&self, volume: f32) {
        self.ambience.set_volume(volume.clamp(0.0, 1.0) as f64);
    }

    /// Called on user gestures: browsers only let audio start from one.
    pub fn wake(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
        if self.ambience.paused() {
            if let Ok(p) = self.ambience.play() {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = wasm_bindgen_futures::JsFuture::from(p).await {
                        log::debug!("[audio] ambience still blocked: {:?}", e);
                    }
                });
            }
        }
    }
}
