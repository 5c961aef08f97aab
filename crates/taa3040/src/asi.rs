//! Audio serial interface framing, slot mapping and clock generation.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::bitfield::{decode_channel_mask, encode_channel_mask};
use crate::config::{
    AsiChannelConfig, AsiConfig, AsiFormat, AsiWordLength, ClockRatio, ClockRole, KeeperMode,
    MasterClockConfig, MclkFrequency, SampleRate,
};
use crate::device::Taa3040;
use crate::error::Error;
use crate::page::Page;
use crate::registers::{
    asi_channel_register, ASI_DAISY, ASI_ERR, ASI_ERR_RCOV, ASI_FORMAT, ASI_WLEN,
    AUTO_CLK_CFG, AUTO_MODE_PLL_DIS, BCLK_FSYNC_GATE, BCLK_POL, CH_OUTPUT, CH_SLOT, FSYNC_POL,
    FS_BCLK_RATIO, FS_MODE, FS_RATE, MCLK_FREQ_SEL, MST_SLV_CFG, REG_ASI_CFG0, REG_ASI_CFG1,
    REG_ASI_CFG2, REG_ASI_OUT_CH_EN, REG_MST_CFG0, REG_MST_CFG1, TX_EDGE, TX_FILL, TX_KEEPER,
    TX_LSB, TX_OFFSET,
};
use crate::NUM_CHANNELS;

/// Raw page-0 bytes carrying [`AsiConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AsiRegisters {
    /// ASI_CFG0 (0x07)
    pub asi_cfg0: u8,
    /// ASI_CFG1 (0x08)
    pub asi_cfg1: u8,
    /// ASI_CFG2 (0x09)
    pub asi_cfg2: u8,
    /// ASI_CH1..ASI_CH8 (0x0B..0x12)
    pub asi_ch: [u8; NUM_CHANNELS],
    /// MST_CFG0 (0x13)
    pub mst_cfg0: u8,
    /// MST_CFG1 (0x14)
    pub mst_cfg1: u8,
    /// ASI_OUT_CH_EN (0x74)
    pub out_ch_en: u8,
}

impl AsiRegisters {
    /// Encode `cfg`.
    pub fn encode(cfg: &AsiConfig) -> Self {
        let mut cfg0 = ASI_FORMAT.insert(0, cfg.format.bits());
        cfg0 = ASI_WLEN.insert(cfg0, cfg.word_length.bits());
        cfg0 = FSYNC_POL.insert_flag(cfg0, cfg.fsync_inverted);
        cfg0 = BCLK_POL.insert_flag(cfg0, cfg.bclk_inverted);
        cfg0 = TX_EDGE.insert_flag(cfg0, cfg.tx_edge);
        cfg0 = TX_FILL.insert_flag(cfg0, cfg.tx_fill_hi_z);

        let mut cfg1 = TX_LSB.insert_flag(0, cfg.lsb_hi_z);
        cfg1 = TX_KEEPER.insert(cfg1, cfg.keeper.bits());
        cfg1 = TX_OFFSET.insert(cfg1, cfg.tx_offset);

        // Detection and recovery are active-low in hardware.
        let mut cfg2 = ASI_DAISY.insert_flag(0, cfg.daisy_chain);
        cfg2 = ASI_ERR.insert_flag(cfg2, !cfg.error_detection);
        cfg2 = ASI_ERR_RCOV.insert_flag(cfg2, !cfg.error_recovery);

        let mut asi_ch = [0u8; NUM_CHANNELS];
        for (byte, ch) in asi_ch.iter_mut().zip(cfg.channels.iter()) {
            *byte = CH_SLOT.insert(CH_OUTPUT.insert_flag(0, ch.secondary_output), ch.slot);
        }

        let enabled = cfg.channels.map(|ch| ch.enabled);
        let (mst_cfg0, mst_cfg1) = encode_master(cfg.role, &cfg.master);

        Self {
            asi_cfg0: cfg0,
            asi_cfg1: cfg1,
            asi_cfg2: cfg2,
            asi_ch,
            mst_cfg0,
            mst_cfg1,
            out_ch_en: encode_channel_mask(&enabled),
        }
    }

    /// Decode the configuration held in these bytes.
    pub fn decode(&self) -> AsiConfig {
        let enabled = decode_channel_mask(self.out_ch_en);
        let mut channels = [AsiChannelConfig::default(); NUM_CHANNELS];
        for ((ch, &byte), &on) in channels.iter_mut().zip(self.asi_ch.iter()).zip(enabled.iter()) {
            *ch = AsiChannelConfig {
                enabled: on,
                secondary_output: CH_OUTPUT.extract_flag(byte),
                slot: CH_SLOT.extract(byte),
            };
        }

        AsiConfig {
            format: AsiFormat::from_bits(ASI_FORMAT.extract(self.asi_cfg0)),
            word_length: AsiWordLength::from_bits(ASI_WLEN.extract(self.asi_cfg0)),
            role: ClockRole::from_master_bit(MST_SLV_CFG.extract_flag(self.mst_cfg0)),
            fsync_inverted: FSYNC_POL.extract_flag(self.asi_cfg0),
            bclk_inverted: BCLK_POL.extract_flag(self.asi_cfg0),
            tx_edge: TX_EDGE.extract_flag(self.asi_cfg0),
            tx_fill_hi_z: TX_FILL.extract_flag(self.asi_cfg0),
            lsb_hi_z: TX_LSB.extract_flag(self.asi_cfg1),
            keeper: KeeperMode::from_bits(TX_KEEPER.extract(self.asi_cfg1)),
            tx_offset: TX_OFFSET.extract(self.asi_cfg1),
            daisy_chain: ASI_DAISY.extract_flag(self.asi_cfg2),
            error_detection: !ASI_ERR.extract_flag(self.asi_cfg2),
            error_recovery: !ASI_ERR_RCOV.extract_flag(self.asi_cfg2),
            master: decode_master(self.mst_cfg0, self.mst_cfg1),
            channels,
        }
    }
}

fn encode_master(role: ClockRole, m: &MasterClockConfig) -> (u8, u8) {
    let mut cfg0 = MST_SLV_CFG.insert_flag(0, role.is_master());
    cfg0 = AUTO_CLK_CFG.insert_flag(cfg0, !m.auto_clock);
    cfg0 = AUTO_MODE_PLL_DIS.insert_flag(cfg0, m.pll_disabled_in_auto);
    cfg0 = BCLK_FSYNC_GATE.insert_flag(cfg0, m.gate_clocks);
    cfg0 = FS_MODE.insert_flag(cfg0, !m.family_48k);
    cfg0 = MCLK_FREQ_SEL.insert(cfg0, m.mclk.bits());

    let cfg1 = FS_BCLK_RATIO.insert(FS_RATE.insert(0, m.sample_rate.bits()), m.ratio.bits());
    (cfg0, cfg1)
}

fn decode_master(cfg0: u8, cfg1: u8) -> MasterClockConfig {
    MasterClockConfig {
        sample_rate: SampleRate::from_bits(FS_RATE.extract(cfg1)),
        ratio: ClockRatio::from_bits(FS_BCLK_RATIO.extract(cfg1)),
        mclk: MclkFrequency::from_bits(MCLK_FREQ_SEL.extract(cfg0)),
        auto_clock: !AUTO_CLK_CFG.extract_flag(cfg0),
        pll_disabled_in_auto: AUTO_MODE_PLL_DIS.extract_flag(cfg0),
        gate_clocks: BCLK_FSYNC_GATE.extract_flag(cfg0),
        family_48k: !FS_MODE.extract_flag(cfg0),
    }
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program ASI framing, slot mapping, clocking and output enables.
    pub fn write_asi_config(&mut self, cfg: &AsiConfig) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write ASI config");
        let regs = AsiRegisters::encode(cfg);
        self.on_page(Page::CONFIG, |dev| {
            dev.write_reg(REG_ASI_CFG0, regs.asi_cfg0)?;
            dev.write_reg(REG_ASI_CFG1, regs.asi_cfg1)?;
            dev.write_reg(REG_ASI_CFG2, regs.asi_cfg2)?;
            for (ch, &byte) in (0u8..).zip(regs.asi_ch.iter()) {
                dev.write_reg(asi_channel_register(ch), byte)?;
            }
            dev.write_reg(REG_MST_CFG0, regs.mst_cfg0)?;
            dev.write_reg(REG_MST_CFG1, regs.mst_cfg1)?;
            dev.write_reg(REG_ASI_OUT_CH_EN, regs.out_ch_en)
        })
    }

    /// Read back ASI framing, slot mapping, clocking and output enables.
    pub fn read_asi_config(&mut self) -> Result<AsiConfig, Error<I2C::Error>> {
        debug!("taa3040: read ASI config");
        self.on_page(Page::CONFIG, |dev| {
            let mut regs = AsiRegisters {
                asi_cfg0: dev.read_reg(REG_ASI_CFG0)?,
                asi_cfg1: dev.read_reg(REG_ASI_CFG1)?,
                asi_cfg2: dev.read_reg(REG_ASI_CFG2)?,
                ..AsiRegisters::default()
            };
            for (ch, byte) in (0u8..).zip(regs.asi_ch.iter_mut()) {
                *byte = dev.read_reg(asi_channel_register(ch))?;
            }
            regs.mst_cfg0 = dev.read_reg(REG_MST_CFG0)?;
            regs.mst_cfg1 = dev.read_reg(REG_MST_CFG1)?;
            regs.out_ch_en = dev.read_reg(REG_ASI_OUT_CH_EN)?;
            Ok(regs.decode())
        })
    }
}
